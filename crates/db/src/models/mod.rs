pub mod finance;
