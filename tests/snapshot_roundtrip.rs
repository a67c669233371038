use cell_complex::prelude::*;

fn wing_complex() -> (CellComplex, [VertexId; 4]) {
    let fmt = VertexFormat::from_attributes([("position", 2), ("uv", 2)]).unwrap();
    let mut cx = CellComplex::new(2, fmt, "position").unwrap();
    let a = cx.add_vert(&[0.0, 0.0, 0.0, 0.0]).unwrap();
    let b = cx.add_vert(&[1.0, 0.0, 1.0, 0.0]).unwrap();
    let c = cx.add_vert(&[0.0, 1.0, 0.0, 1.0]).unwrap();
    let d = cx.add_vert(&[1.0, 1.0, 1.0, 1.0]).unwrap();
    cx.add_cell(&[a, b, c]).unwrap();
    cx.add_cell(&[a, b, d]).unwrap();
    (cx, [a, b, c, d])
}

#[test]
fn json_roundtrip_preserves_structure() {
    let (cx, _) = wing_complex();
    let snapshot = cx.export();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: ComplexSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);

    let rebuilt = CellComplex::from_snapshot(&parsed).unwrap();
    assert_eq!(rebuilt.counts(), cx.counts());
    assert_eq!(rebuilt.get_vert_buffer(), cx.get_vert_buffer());
    // Replay preserves slot order and relative cell order, so the emitted
    // index buffers agree even though raw ids may differ.
    for dim in 0..=2 {
        assert_eq!(
            rebuilt.get_index_buffer(dim, false).unwrap(),
            cx.get_index_buffer(dim, false).unwrap()
        );
        assert_eq!(
            rebuilt.get_index_buffer(dim, true).unwrap(),
            cx.get_index_buffer(dim, true).unwrap()
        );
    }
    rebuilt.validate_invariants().unwrap();
}

#[test]
fn bincode_roundtrip_of_the_snapshot() {
    let snapshot = wing_complex().0.export();
    let bytes = bincode::serialize(&snapshot).unwrap();
    let parsed: ComplexSnapshot = bincode::deserialize(&bytes).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn roundtrip_after_mutation_still_matches() {
    let (mut cx, [_, _, _, d]) = wing_complex();
    // Drop one wing vertex, cascading away its face and compacting the
    // buffer, then make sure the snapshot reflects the survivor.
    cx.remove_cell(CellId::vertex(d));
    assert_eq!(cx.counts(), vec![3, 3, 1]);

    let rebuilt = CellComplex::from_snapshot(&cx.export()).unwrap();
    assert_eq!(rebuilt.counts(), cx.counts());
    assert_eq!(rebuilt.get_vert_buffer(), cx.get_vert_buffer());
    for dim in 0..=2 {
        assert_eq!(
            rebuilt.get_index_buffer(dim, false).unwrap(),
            cx.get_index_buffer(dim, false).unwrap()
        );
    }
    rebuilt.validate_invariants().unwrap();
}

#[test]
fn export_carries_format_and_position_attribute() {
    let (cx, _) = wing_complex();
    let snapshot = cx.export();
    assert_eq!(snapshot.position_attribute, "position");
    assert_eq!(snapshot.format.stride(), 4);
    assert_eq!(snapshot.max_dim, 2);
    assert_eq!(snapshot.vertices.len(), 16);
    // Tuples per dimension: 5 edges, 2 faces.
    assert_eq!(snapshot.cells[0].len(), 5);
    assert_eq!(snapshot.cells[1].len(), 2);
    assert!(snapshot.cells[1].iter().all(|t| t.len() == 3));
}

#[test]
fn empty_complex_roundtrips() {
    let fmt = VertexFormat::from_attributes([("position", 3)]).unwrap();
    let cx = CellComplex::new(3, fmt, "position").unwrap();
    let rebuilt = CellComplex::from_snapshot(&cx.export()).unwrap();
    assert_eq!(rebuilt.counts(), vec![0, 0, 0, 0]);
    assert_eq!(rebuilt.max_dim(), 3);
}
