mod area;
mod degree_celsius;

pub use area::SquareFeet;
pub use area::SquareMeters;
pub use degree_celsius::DegreeCelsius;

#[cfg(test)]
macro_rules! v {
    ($x:literal C) => {
        $crate::core::unit::DegreeCelsius($x as f64)
    };
    ($x:literal sqft) => {
        $crate::core::unit::SquareFeet($x as f64)
    };
}

#[cfg(test)]
pub(crate) use v;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_celsius() {
        assert_eq!(v!(25 C), DegreeCelsius(25.0));
        assert_eq!(v!(25 C) - v!(5 C), DegreeCelsius(20.0));
        assert_eq!(v!(2 C) * 1.5, DegreeCelsius(3.0));
        assert_eq!(v!(21.5 C).to_string(), "21.50 °C");
    }

    #[test]
    fn test_square_feet_to_square_meters() {
        assert_eq!(SquareMeters::from(v!(10.764 sqft)), SquareMeters(1.0));
        assert_eq!(SquareMeters::from(v!(0 sqft)), SquareMeters(0.0));
        assert_eq!(v!(1000 sqft).to_string(), "1000.0 sqft");
    }
}
