pub mod assessment;
pub mod edit;
pub mod lifestyle;
pub mod measurement;
pub mod screening;
pub mod selection;
