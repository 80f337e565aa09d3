//! Service layer for student records.
//! - `StudentRepository` abstracts persistence; SeaORM and in-memory implementations.
//! - `StudentService` owns the business rules and error taxonomy.

pub mod errors;
pub mod student;
#[cfg(test)]
pub mod test_support;
