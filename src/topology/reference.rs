//! Reference cells built recursively from a point.
//!
//! Every reference cell is `Point` wrapped in a chain of two constructors:
//! `Prism(B) = B × [0, 1]` and `Pyramid(B)`, the cone over `B` with its apex
//! at `x_{d-1} = 1`. The dimension equals the number of constructors, and the
//! coordinate introduced by the constructor at level `d` is `x_{d-1}`.

use crate::basis_error::BasisError;
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a topology's recursive decomposition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Constructor {
    Point,
    Prism,
    Pyramid,
}

/// A reference cell as a closed recursive type.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Topology {
    /// The 0-dimensional base case.
    Point,
    /// Tensor product of the base with the unit interval.
    Prism(Box<Topology>),
    /// Cone over the base.
    Pyramid(Box<Topology>),
}

/// Hashable identity of a topology (Dune-style id plus dimension).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TopologyKey {
    pub id: u32,
    pub dimension: u32,
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Point
    }
}

impl Topology {
    pub fn point() -> Self {
        Topology::Point
    }

    pub fn prism_over(base: Topology) -> Self {
        Topology::Prism(Box::new(base))
    }

    pub fn pyramid_over(base: Topology) -> Self {
        Topology::Pyramid(Box::new(base))
    }

    /// Simplex of dimension `dim` (a tower of pyramids).
    pub fn simplex(dim: u32) -> Self {
        (0..dim).fold(Topology::Point, |t, _| Topology::pyramid_over(t))
    }

    /// Cube of dimension `dim` (a tower of prisms).
    pub fn cube(dim: u32) -> Self {
        (0..dim).fold(Topology::Point, |t, _| Topology::prism_over(t))
    }

    pub fn line() -> Self {
        Self::simplex(1)
    }

    pub fn triangle() -> Self {
        Self::simplex(2)
    }

    pub fn quadrilateral() -> Self {
        Self::cube(2)
    }

    pub fn tetrahedron() -> Self {
        Self::simplex(3)
    }

    pub fn hexahedron() -> Self {
        Self::cube(3)
    }

    /// Triangle extruded along `x_2`.
    pub fn prism() -> Self {
        Self::prism_over(Self::triangle())
    }

    /// Cone over the unit square.
    pub fn pyramid() -> Self {
        Self::pyramid_over(Self::quadrilateral())
    }

    /// The base topology, `None` for a point.
    pub fn base(&self) -> Option<&Topology> {
        match self {
            Topology::Point => None,
            Topology::Prism(base) | Topology::Pyramid(base) => Some(base),
        }
    }

    /// Outermost constructor.
    pub fn constructor(&self) -> Constructor {
        match self {
            Topology::Point => Constructor::Point,
            Topology::Prism(_) => Constructor::Prism,
            Topology::Pyramid(_) => Constructor::Pyramid,
        }
    }

    /// Constructors ordered from the point outwards; entry `d` builds the
    /// cell of dimension `d`.
    pub fn constructors(&self) -> Vec<Constructor> {
        let mut chain = Vec::with_capacity(self.dimension() as usize + 1);
        let mut current = Some(self);
        while let Some(t) = current {
            chain.push(t.constructor());
            current = t.base();
        }
        chain.reverse();
        chain
    }

    pub fn dimension(&self) -> u32 {
        match self.base() {
            None => 0,
            Some(base) => base.dimension() + 1,
        }
    }

    /// Diagnostic name: `p` for the point, then one letter per constructor
    /// (`l` for prism, `o` for pyramid).
    pub fn name(&self) -> String {
        match self {
            Topology::Point => "p".to_string(),
            Topology::Prism(base) => format!("{}l", base.name()),
            Topology::Pyramid(base) => format!("{}o", base.name()),
        }
    }

    /// Bit `d-1` is set iff the constructor at level `d` is a prism.
    pub fn id(&self) -> u32 {
        match self {
            Topology::Point => 0,
            Topology::Prism(base) => base.id() | (1 << (self.dimension() - 1)),
            Topology::Pyramid(base) => base.id(),
        }
    }

    pub fn key(&self) -> TopologyKey {
        TopologyKey {
            id: self.id(),
            dimension: self.dimension(),
        }
    }

    /// Rebuild a topology from its id and dimension.
    pub fn from_id(id: u32, dimension: u32) -> Result<Self, BasisError> {
        if dimension >= 32 || (id >> dimension) != 0 {
            return Err(BasisError::InvalidTopology(format!(
                "id {id} is out of range for dimension {dimension}"
            )));
        }
        Ok((1..=dimension).fold(Topology::Point, |t, d| {
            if id & (1 << (d - 1)) != 0 {
                Topology::prism_over(t)
            } else {
                Topology::pyramid_over(t)
            }
        }))
    }

    /// Parse a diagnostic name such as `"poo"` (triangle) or `"plll"` (cube).
    pub fn from_name(name: &str) -> Result<Self, BasisError> {
        let mut chars = name.chars();
        if chars.next() != Some('p') {
            return Err(BasisError::InvalidTopology(format!(
                "name `{name}` must start with `p`"
            )));
        }
        chars.try_fold(Topology::Point, |t, c| match c {
            'l' => Ok(Topology::prism_over(t)),
            'o' => Ok(Topology::pyramid_over(t)),
            other => Err(BasisError::InvalidTopology(format!(
                "unexpected constructor `{other}` in `{name}`"
            ))),
        })
    }

    /// Whether every constructor above the first is a pyramid. In one
    /// dimension prism and pyramid coincide, so both lines are simplices.
    pub fn is_simplex(&self) -> bool {
        (self.id() >> 1) == 0
    }

    /// Whether every constructor above the first is a prism.
    pub fn is_cube(&self) -> bool {
        let dim = self.dimension();
        dim == 0 || (self.id() | 1) == (1 << dim) - 1
    }

    /// Exact integral of `x^exponents` over the reference cell.
    ///
    /// `exponents` must provide one entry per dimension.
    pub fn monomial_integral(&self, exponents: &[u32]) -> BigRational {
        let dim = self.dimension() as usize;
        assert_eq!(
            exponents.len(),
            dim,
            "exponent vector does not match the cell dimension"
        );
        match self {
            Topology::Point => BigRational::from_integer(BigInt::from(1)),
            Topology::Prism(base) => {
                let a = exponents[dim - 1] as usize;
                base.monomial_integral(&exponents[..dim - 1])
                    * BigRational::new(BigInt::from(1), BigInt::from(a + 1))
            }
            Topology::Pyramid(base) => {
                let a = exponents[dim - 1] as usize;
                let base_degree: usize = exponents[..dim - 1].iter().map(|&e| e as usize).sum();
                // beta(a + 1, |alpha'| + d) from the cone substitution
                let factor = BigRational::new(
                    factorial(a) * factorial(base_degree + dim - 1),
                    factorial(a + base_degree + dim),
                );
                base.monomial_integral(&exponents[..dim - 1]) * factor
            }
        }
    }

    /// Volume of the reference cell.
    pub fn volume(&self) -> BigRational {
        self.monomial_integral(&vec![0; self.dimension() as usize])
    }
}

fn factorial(n: usize) -> BigInt {
    (2..=n).fold(BigInt::from(1), |acc, k| acc * BigInt::from(k))
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn dimension_and_name() {
        assert_eq!(Topology::point().dimension(), 0);
        assert_eq!(Topology::triangle().name(), "poo");
        assert_eq!(Topology::hexahedron().name(), "plll");
        assert_eq!(Topology::prism().name(), "pool");
        assert_eq!(Topology::pyramid().name(), "pllo");
        assert_eq!(Topology::pyramid().dimension(), 3);
    }

    #[test]
    fn id_round_trip() {
        for dim in 0..4 {
            for id in 0..(1u32 << dim) {
                let t = Topology::from_id(id, dim).unwrap();
                assert_eq!(t.id(), id);
                assert_eq!(t.dimension(), dim);
                assert_eq!(Topology::from_name(&t.name()).unwrap(), t);
            }
        }
        assert!(Topology::from_id(4, 2).is_err());
        assert!(Topology::from_name("plx").is_err());
        assert!(Topology::from_name("ol").is_err());
    }

    #[test]
    fn simplex_and_cube_classification() {
        assert!(Topology::triangle().is_simplex());
        assert!(Topology::pyramid_over(Topology::cube(1)).is_simplex());
        assert!(!Topology::pyramid().is_simplex());
        assert!(Topology::quadrilateral().is_cube());
        assert!(Topology::prism_over(Topology::simplex(1)).is_cube());
        assert!(!Topology::prism().is_cube());
        assert!(Topology::line().is_simplex() && Topology::line().is_cube());
    }

    #[test]
    fn constructor_chain_is_innermost_first() {
        let chain = Topology::prism().constructors();
        assert_eq!(
            chain,
            vec![
                Constructor::Point,
                Constructor::Pyramid,
                Constructor::Pyramid,
                Constructor::Prism
            ]
        );
    }

    #[test]
    fn volumes() {
        assert_eq!(Topology::triangle().volume(), ratio(1, 2));
        assert_eq!(Topology::tetrahedron().volume(), ratio(1, 6));
        assert_eq!(Topology::hexahedron().volume(), ratio(1, 1));
        assert_eq!(Topology::prism().volume(), ratio(1, 2));
        assert_eq!(Topology::pyramid().volume(), ratio(1, 3));
    }

    #[test]
    fn triangle_moment() {
        // x * y over the unit triangle: 1! 1! / 4!
        assert_eq!(Topology::triangle().monomial_integral(&[1, 1]), ratio(1, 24));
        // z over the square pyramid: 1/12
        assert_eq!(Topology::pyramid().monomial_integral(&[0, 0, 1]), ratio(1, 12));
    }
}
