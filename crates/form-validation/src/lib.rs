//! Validation engine for the ONG registration form: a declarative table of
//! synchronous field rules, the CNPJ checksum, pure input maskers and the
//! orchestrator that folds the asynchronous postal-code check into an
//! ordered submission report.

pub mod cnpj;
pub mod masking;
pub mod predicates;
pub mod report;
pub mod rules;
pub mod validator;
