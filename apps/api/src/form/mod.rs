// Application form core: state model, posting catalog, eligibility
// derivation, resume reconciliation, and the session controller.

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod validation;
