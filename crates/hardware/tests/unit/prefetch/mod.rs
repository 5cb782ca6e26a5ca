


/// Four-state reference prediction table.
pub mod rpt;
