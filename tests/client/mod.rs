//! Fillout client tests against a local stand-in of the submissions API

pub mod fillout;
