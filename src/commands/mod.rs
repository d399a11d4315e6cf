pub mod normalize;
pub mod ocr;
pub mod report;
pub mod score;
pub mod tools;
