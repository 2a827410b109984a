pub use ledger::{Substitution, SubstitutionLedger};

mod ledger;
