pub mod anagram;
pub mod calendar;
pub mod cards;
pub mod circle;
pub mod coffee_shop;
pub mod currency;
pub mod family;
pub mod genetics;
pub mod payroll;
pub mod pets;
pub mod sentence;
pub mod shopping;
pub mod strings;
pub mod text;
