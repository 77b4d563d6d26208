//! Contains the plain data types shared between the validation engine, the
//! postal-code lookup client and the host embedding them: the form snapshot,
//! field identifiers and the strongly typed values derived from raw input.

pub mod cep;
pub mod digits;
pub mod field;
pub mod file;
pub mod form;
pub mod uf;
