pub mod reset_request;
