pub mod derive;
pub mod run;
pub mod version;
