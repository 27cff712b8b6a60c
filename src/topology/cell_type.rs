//! Named cell types and their recursive reference topologies.

use super::reference::Topology;

/// Element shapes as a mesh names them.
///
/// Every variant has a recursive reference cell; the fixed names cover the
/// cells up to dimension three, `Simplex(d)` and `Cube(d)` the families in
/// any dimension.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellType {
    #[default]
    Vertex,
    Segment,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Hexahedron,
    /// Triangle extruded along `z`.
    Prism,
    /// Square base with the apex above the origin.
    Pyramid,
    Simplex(u8),
    Cube(u8),
}

impl CellType {
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
            CellType::Simplex(d) | CellType::Cube(d) => d,
        }
    }

    /// Reference topology of the cell. Segments use the simplex tower;
    /// `Cube(1)` is the prism-built interval with its own id.
    pub fn topology(self) -> Topology {
        match self {
            CellType::Vertex => Topology::point(),
            CellType::Segment => Topology::line(),
            CellType::Triangle => Topology::triangle(),
            CellType::Quadrilateral => Topology::quadrilateral(),
            CellType::Tetrahedron => Topology::tetrahedron(),
            CellType::Hexahedron => Topology::hexahedron(),
            CellType::Prism => Topology::prism(),
            CellType::Pyramid => Topology::pyramid(),
            CellType::Simplex(d) => Topology::simplex(u32::from(d)),
            CellType::Cube(d) => Topology::cube(u32::from(d)),
        }
    }

    /// Fixed-name cell type for a topology, if it has one.
    pub fn from_topology(topology: &Topology) -> Option<CellType> {
        let named = [
            CellType::Vertex,
            CellType::Segment,
            CellType::Triangle,
            CellType::Quadrilateral,
            CellType::Tetrahedron,
            CellType::Hexahedron,
            CellType::Prism,
            CellType::Pyramid,
        ];
        let key = topology.key();
        named.into_iter().find(|ct| ct.topology().key() == key)
    }
}

impl From<CellType> for Topology {
    fn from(cell_type: CellType) -> Self {
        cell_type.topology()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_agree_with_topology() {
        for ct in [
            CellType::Vertex,
            CellType::Segment,
            CellType::Triangle,
            CellType::Quadrilateral,
            CellType::Tetrahedron,
            CellType::Hexahedron,
            CellType::Prism,
            CellType::Pyramid,
            CellType::Simplex(4),
            CellType::Cube(4),
        ] {
            assert_eq!(Topology::from(ct).dimension(), u32::from(ct.dimension()));
        }
    }

    #[test]
    fn families_agree_with_fixed_names() {
        assert_eq!(CellType::Simplex(3).topology(), CellType::Tetrahedron.topology());
        assert_eq!(CellType::Cube(2).topology(), CellType::Quadrilateral.topology());
        assert_eq!(
            CellType::from_topology(&CellType::Cube(3).topology()),
            Some(CellType::Hexahedron)
        );
    }

    #[test]
    fn lookup_by_topology() {
        assert_eq!(
            CellType::from_topology(&Topology::pyramid()),
            Some(CellType::Pyramid)
        );
        // Segment maps to the pyramid-built line; the prism-built one has id 1
        assert_eq!(CellType::from_topology(&Topology::cube(1)), None);
        assert_eq!(CellType::from_topology(&Topology::simplex(4)), None);
    }
}
