pub mod area;
pub mod login;
pub mod my_access;
pub mod workspace;
