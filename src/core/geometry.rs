//! Datenmodell für Zielpunkte und Pfade.
//!
//! Weltkoordinaten mit Ursprung im gemeinsamen Drehpunkt beider Arme,
//! +Y zeigt vom Drehpunkt weg ("oben"), +X nach rechts.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Zielpunkt in Weltkoordinaten (f64).
pub type Point2D = DVec2;

/// Ein Element eines Zeichenpfads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    /// Abtastpunkt, der mit abgesenktem Stift angefahren wird
    Sample(Point2D),
    /// Stift anheben: trennt zwei unabhängig gezeichnete Teilpfade
    PenLift,
}

/// Geordnete Folge von Pfad-Elementen. Die Reihenfolge ist signifikant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Erstellt einen leeren Pfad
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut einen Pfad aus mehreren Teilpfaden; zwischen je zwei
    /// nicht-leeren Teilpfaden wird genau ein `PenLift` eingefügt.
    pub fn from_subpaths<I, S>(subpaths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Point2D>,
    {
        let mut path = Self::new();
        for subpath in subpaths {
            let mut points = subpath.into_iter().peekable();
            if points.peek().is_none() {
                continue;
            }
            if !path.is_empty() {
                path.push_pen_lift();
            }
            for point in points {
                path.push_sample(point);
            }
        }
        path
    }

    pub fn push_sample(&mut self, point: Point2D) {
        self.elements.push(PathElement::Sample(point));
    }

    pub fn push_pen_lift(&mut self) {
        self.elements.push(PathElement::PenLift);
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Anzahl der Abtastpunkte (ohne Pen-Lifts)
    pub fn sample_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PathElement::Sample(_)))
            .count()
    }

    /// Anzahl der Pen-Lift-Marker
    pub fn pen_lift_count(&self) -> usize {
        self.elements.len() - self.sample_count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_subpaths_inserts_single_lift_between_subpaths() {
        let path = Path::from_subpaths(vec![
            vec![DVec2::new(0.0, 150.0), DVec2::new(10.0, 150.0)],
            vec![],
            vec![DVec2::new(0.0, 200.0)],
        ]);

        assert_eq!(
            path.elements(),
            &[
                PathElement::Sample(DVec2::new(0.0, 150.0)),
                PathElement::Sample(DVec2::new(10.0, 150.0)),
                PathElement::PenLift,
                PathElement::Sample(DVec2::new(0.0, 200.0)),
            ]
        );
        assert_eq!(path.sample_count(), 3);
        assert_eq!(path.pen_lift_count(), 1);
    }

    #[test]
    fn test_from_subpaths_without_points_is_empty() {
        let path = Path::from_subpaths(Vec::<Vec<DVec2>>::new());
        assert!(path.is_empty());
    }
}
