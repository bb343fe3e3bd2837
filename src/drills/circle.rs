use crate::utils::error::{DrillError, Result};
use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    radius: f64,
}

fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(DrillError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("{} must be positive.", field),
        });
    }
    Ok(())
}

impl Circle {
    pub fn from_radius(radius: f64) -> Result<Self> {
        ensure_positive("Radius", radius)?;
        Ok(Self { radius })
    }

    pub fn from_diameter(diameter: f64) -> Result<Self> {
        ensure_positive("Diameter", diameter)?;
        Ok(Self {
            radius: diameter / 2.0,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        ensure_positive("Radius", radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_diameter(&mut self, diameter: f64) -> Result<()> {
        ensure_positive("Diameter", diameter)?;
        self.radius = diameter / 2.0;
        Ok(())
    }

    pub fn area(&self) -> f64 {
        PI * self.radius.powi(2)
    }
}

impl PartialEq for Circle {
    fn eq(&self, other: &Self) -> bool {
        (self.radius - other.radius).abs() <= 1e-9 * self.radius.abs().max(other.radius.abs())
    }
}

impl PartialOrd for Circle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else {
            self.radius.partial_cmp(&other.radius)
        }
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circle(radius={:.2}, diameter={:.2}, area={:.2})",
            self.radius,
            self.diameter(),
            self.area()
        )
    }
}

/// 依半徑由小到大排序
pub fn sorted(circles: &[Circle]) -> Vec<Circle> {
    let mut out = circles.to_vec();
    out.sort_by(|a, b| a.radius.total_cmp(&b.radius));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_setters() {
        let mut c1 = Circle::from_radius(50.0).unwrap();
        assert_eq!(
            c1.to_string(),
            "Circle(radius=50.00, diameter=100.00, area=7853.98)"
        );

        let mut c2 = Circle::from_diameter(200.0).unwrap();
        assert_eq!(c2.radius(), 100.0);
        c2.set_diameter(50.0).unwrap();
        assert!((c2.area() - 490.873_852_123_405_2).abs() < 1e-9);

        c1.set_radius(7.0).unwrap();
        assert!(c1.set_radius(-1.0).is_err());
        assert!(Circle::from_diameter(0.0).is_err());
        assert!(Circle::from_radius(f64::NAN).is_err());
    }

    #[test]
    fn test_comparisons_and_sorting() {
        let c1 = Circle::from_radius(7.0).unwrap();
        let c2 = Circle::from_diameter(50.0).unwrap();
        let c3 = Circle::from_radius(100.0).unwrap();
        let c4 = Circle::from_radius(100.0).unwrap();

        assert!(c2 > c1);
        assert!(c1 < c2);
        assert_eq!(c3, c4);

        let radii: Vec<f64> = sorted(&[c3, c1, c4, c2]).iter().map(Circle::radius).collect();
        assert_eq!(radii, vec![7.0, 25.0, 100.0, 100.0]);
    }
}
