use cell_complex::prelude::*;

fn complex(max_dim: usize) -> CellComplex {
    let fmt = VertexFormat::from_attributes([("position", 2)]).unwrap();
    CellComplex::new(max_dim, fmt, "position").unwrap()
}

#[test]
fn splitting_an_edge_retriangulates_the_face() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0]).unwrap();
    cx.add_cell(&[a, b, c]).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();

    let edge = cx.lookup_cell(&[a, b]).unwrap();
    cx.split_cell(edge, v).unwrap();

    // One vertex more; the split edge is gone, replaced by two halves, and
    // the face got retriangulated around the new vertex.
    assert_eq!(cx.counts(), vec![4, 5, 2]);
    assert_eq!(cx.lookup_cell(&[a, b]), None);
    assert!(cx.lookup_cell(&[a, v]).is_some());
    assert!(cx.lookup_cell(&[v, b]).is_some());
    assert_eq!(cx.lookup_cell(&[a, b, c]), None);
    assert!(cx.lookup_cell(&[v, b, c]).is_some());
    assert!(cx.lookup_cell(&[a, v, c]).is_some());

    // Facets away from the split keep their surface classification.
    let far_edge = cx.lookup_cell(&[c, b]).unwrap();
    assert_eq!(cx.coboundary(far_edge).unwrap().len(), 1);
    cx.validate_invariants().unwrap();
}

#[test]
fn splitting_an_edge_inside_a_tetrahedron() {
    let mut cx = complex(3);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0]).unwrap();
    let d = cx.add_vert(&[0.5, 0.5]).unwrap();
    cx.add_cell(&[a, b, c, d]).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();

    let edge = cx.lookup_cell(&[a, b]).unwrap();
    cx.split_cell(edge, v).unwrap();

    // The standard edge split of a tetrahedron: two tetrahedra sharing the
    // triangle (v, c, d).
    assert_eq!(cx.counts(), vec![5, 9, 7, 2]);
    assert!(cx.lookup_cell(&[v, b, c, d]).is_some());
    assert!(cx.lookup_cell(&[a, v, c, d]).is_some());
    assert_eq!(cx.lookup_cell(&[a, b, c, d]), None);
    let shared = cx.lookup_cell(&[v, c, d]).unwrap();
    assert_eq!(cx.coboundary(shared).unwrap().len(), 2);
    // Every other triangle sits on the surface.
    assert_eq!(cx.get_index_buffer(2, true).unwrap().len(), 6 * 3);
    cx.validate_invariants().unwrap();
}

#[test]
fn split_preconditions_are_reported_without_mutation() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0]).unwrap();
    cx.add_cell(&[a, b, c]).unwrap();
    let edge = cx.lookup_cell(&[a, b]).unwrap();
    let before = cx.counts();

    // The target vertex must exist...
    let ghost = VertexId::new(404).unwrap();
    assert_eq!(
        cx.split_cell(edge, ghost).unwrap_err(),
        CellComplexError::InvalidVertex(ghost)
    );
    // ...must be isolated...
    assert_eq!(
        cx.split_cell(edge, c).unwrap_err(),
        CellComplexError::VertexNotIsolated(c)
    );
    // ...and the cell itself must exist.
    let missing = CellId::new(2, 99).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();
    assert_eq!(
        cx.split_cell(missing, v).unwrap_err(),
        CellComplexError::InvalidCell(missing)
    );
    cx.remove_cell(CellId::vertex(v));
    assert_eq!(cx.counts(), before);
}

#[test]
fn collapsing_an_edge_reattaches_the_star() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0]).unwrap();
    cx.add_cell(&[a, b, c]).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();

    let edge = cx.lookup_cell(&[a, b]).unwrap();
    cx.collapse_cell(edge, v).unwrap();

    // The edge's endpoints and everything containing them are gone; what
    // remains is the star re-attached onto the target vertex.
    assert_eq!(cx.counts(), vec![2, 1, 0]);
    assert!(!cx.contains_cell(CellId::vertex(a)));
    assert!(!cx.contains_cell(CellId::vertex(b)));
    assert!(cx.lookup_cell(&[v, c]).is_some());
    cx.validate_invariants().unwrap();
}

#[test]
fn collapsing_a_shared_edge() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0]).unwrap();
    let d = cx.add_vert(&[1.0, 1.0]).unwrap();
    cx.add_cell(&[a, b, c]).unwrap();
    cx.add_cell(&[a, b, d]).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();

    let edge = cx.lookup_cell(&[a, b]).unwrap();
    cx.collapse_cell(edge, v).unwrap();

    // Both wings collapse to spokes from the target vertex.
    assert_eq!(cx.counts(), vec![3, 2, 0]);
    assert!(cx.lookup_cell(&[v, c]).is_some());
    assert!(cx.lookup_cell(&[v, d]).is_some());
    assert_eq!(cx.lookup_cell(&[c, d]), None);
    cx.validate_invariants().unwrap();
}

#[test]
fn collapse_preconditions_are_reported_without_mutation() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    cx.add_cell(&[a, b]).unwrap();
    let edge = cx.lookup_cell(&[a, b]).unwrap();
    let before = cx.counts();

    assert_eq!(
        cx.collapse_cell(edge, a).unwrap_err(),
        CellComplexError::VertexNotIsolated(a)
    );
    let missing = CellId::new(1, 77).unwrap();
    let ghost = VertexId::new(404).unwrap();
    assert_eq!(
        cx.collapse_cell(missing, ghost).unwrap_err(),
        CellComplexError::InvalidCell(missing)
    );
    assert_eq!(cx.counts(), before);
}

#[test]
fn collapsing_an_isolated_edge_leaves_the_target_vertex() {
    let mut cx = complex(2);
    let a = cx.add_vert(&[0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0]).unwrap();
    cx.add_cell(&[a, b]).unwrap();
    let v = cx.add_vert(&[0.5, 0.0]).unwrap();
    let edge = cx.lookup_cell(&[a, b]).unwrap();
    cx.collapse_cell(edge, v).unwrap();
    // Nothing sat above the edge, so only the target vertex survives.
    assert_eq!(cx.counts(), vec![1, 0, 0]);
    assert!(cx.contains_cell(CellId::vertex(v)));
}
