pub mod ledger;
pub mod planner;
pub mod track;
