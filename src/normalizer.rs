// Text-to-field normalization shared by every ingestion source
pub mod location;
pub mod salary;
pub mod skills;

pub use location::resolve_country;
pub use salary::SalaryNormalizer;
pub use skills::{clean_skills, group_phrases};
