mod locate_service;

pub use locate_service::LocateService;
