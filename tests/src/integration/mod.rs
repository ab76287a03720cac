//! Cross-subsystem scenarios.
//!
//! Every scenario runs against a fully wired `DocflowContainer` on an
//! in-memory store and a fixed clock, so numbers and years are predictable.

#[cfg(test)]
mod harness;

#[cfg(test)]
mod drafts;
#[cfg(test)]
mod invoicing;
#[cfg(test)]
mod numbering;
#[cfg(test)]
mod versions;
