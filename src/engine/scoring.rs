/// Qualitative feedback for a final percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Poor,
    Average,
    WellDone,
}

impl Band {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage <= 35 {
            Band::Poor
        } else if percentage <= 60 {
            Band::Average
        } else {
            Band::WellDone
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Band::Poor => "Result: Poor, try again!",
            Band::Average => "Result: Average performance!",
            Band::WellDone => "Result: Well done!",
        }
    }
}

/// Rounded percentage of `score` over `total`; an empty quiz scores 0.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = score.min(total);
    (score as f64 / total as f64 * 100.0).round() as u32
}
