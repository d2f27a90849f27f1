pub mod analytics;
pub mod planning;
pub mod production_run;
pub mod spools;
