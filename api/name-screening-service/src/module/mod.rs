pub mod name_screening;
