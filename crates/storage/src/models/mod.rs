mod astrological_sign;
mod birth;
mod gender;
mod measurement;
mod profile;

pub use astrological_sign::AstrologicalSign;
pub use birth::{BirthDate, BirthTime};
pub use gender::Gender;
pub use measurement::{Height, HeightUnit, MAX_WEIGHT, MIN_WEIGHT, Weight, WeightUnit};
pub use profile::{ClientOrigin, ProfileRecord, ProfileRow};
