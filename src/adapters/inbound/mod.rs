mod cli;

pub use cli::{render_error, render_json, render_report, Cli, Command, CommandRunner, Mode};
