pub mod department;
pub mod response;
