//! End-to-end vCard tests: fixtures, round trips, tolerant parsing and
//! version conversion.

mod versions;
