pub mod invite_request;
pub mod team;
