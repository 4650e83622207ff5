use std::fmt;
use std::fmt::Formatter;
use serde::Serialize;

/// The eight compass labels, in bucket order starting at north
const DIRECTIONS: [WindDirection; 8] = [
    WindDirection::N,
    WindDirection::NE,
    WindDirection::E,
    WindDirection::SE,
    WindDirection::S,
    WindDirection::SW,
    WindDirection::W,
    WindDirection::NW,
];

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl WindDirection {
    /// Buckets a compass bearing into one of eight 45 degree sectors centered on the labels.
    ///
    /// The bearing is shifted half a sector, floor divided by 45 and reduced modulo 8, so any
    /// real number is accepted, including negative bearings and bearings beyond 360.
    ///
    /// # Arguments
    ///
    /// * 'deg' - wind bearing in degrees
    pub fn from_bearing(deg: f64) -> WindDirection {
        let sector = ((deg + 22.5) / 45.0).floor() as i64;
        DIRECTIONS[sector.rem_euclid(8) as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(WindDirection::from_bearing(0.0), WindDirection::N);
        assert_eq!(WindDirection::from_bearing(90.0), WindDirection::E);
        assert_eq!(WindDirection::from_bearing(180.0), WindDirection::S);
        assert_eq!(WindDirection::from_bearing(225.0), WindDirection::SW);
        assert_eq!(WindDirection::from_bearing(315.0), WindDirection::NW);
    }

    #[test]
    fn test_sector_edges() {
        assert_eq!(WindDirection::from_bearing(22.4), WindDirection::N);
        assert_eq!(WindDirection::from_bearing(22.5), WindDirection::NE);
        assert_eq!(WindDirection::from_bearing(337.4), WindDirection::NW);
        assert_eq!(WindDirection::from_bearing(337.5), WindDirection::N);
        assert_eq!(WindDirection::from_bearing(360.0), WindDirection::N);
    }

    #[test]
    fn test_out_of_range_bearings() {
        assert_eq!(WindDirection::from_bearing(-45.0), WindDirection::NW);
        assert_eq!(WindDirection::from_bearing(-90.0), WindDirection::W);
        assert_eq!(WindDirection::from_bearing(450.0), WindDirection::E);
        assert_eq!(WindDirection::from_bearing(-720.0), WindDirection::N);
    }

    #[test]
    fn test_periodicity() {
        for deg in -1080..=1080 {
            let deg = deg as f64;
            assert_eq!(
                WindDirection::from_bearing(deg),
                WindDirection::from_bearing(deg + 360.0),
                "bearing {}", deg
            );
        }
        for deg in [0.25, 44.75, 133.5, 201.125, 299.875] {
            assert_eq!(WindDirection::from_bearing(deg), WindDirection::from_bearing(deg + 360.0));
        }
    }

    #[test]
    fn test_non_finite_bearing_is_bucketed() {
        assert_eq!(WindDirection::from_bearing(f64::NAN), WindDirection::N);
        assert!(DIRECTIONS.contains(&WindDirection::from_bearing(f64::INFINITY)));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = DIRECTIONS.iter().map(|d| d.to_string()).collect();
        assert_eq!(labels, vec!["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);
    }
}
