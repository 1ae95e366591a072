use remappy_core::LayerState;

#[test]
fn test_rotate_full_cycle_returns_to_start() {
    let cycles: &[&[i32]] = &[&[0], &[0, 1], &[0, 2, 3], &[3, 1, 0, 2]];
    for layers in cycles {
        let mut state = LayerState::new(0, 3, layers[0]);
        for _ in 0..layers.len() {
            state.rotate(layers);
        }
        assert_eq!(state.current(), layers[0], "cycle {:?}", layers);
    }
}

#[test]
fn test_set_outside_range_is_noop() {
    let mut state = LayerState::new(0, 2, 1);
    for target in [-5, -1, 3, 100, i32::MIN, i32::MAX] {
        state.set(target);
        assert_eq!(state.current(), 1, "set({})", target);
    }
}

#[test]
fn test_mixed_operations_stay_in_range() {
    let mut state = LayerState::new(1, 4, 2);
    let steps: Vec<Box<dyn Fn(&mut LayerState)>> = vec![
        Box::new(|s: &mut LayerState| s.inc(3)),
        Box::new(|s: &mut LayerState| s.dec(10)),
        Box::new(|s: &mut LayerState| s.rotate(&[0, 9])),
        Box::new(|s: &mut LayerState| s.set(4)),
        Box::new(|s: &mut LayerState| s.inc(i32::MAX)),
        Box::new(|s: &mut LayerState| s.rotate(&[4, 0])),
        Box::new(|s: &mut LayerState| s.dec(i32::MAX)),
    ];
    for step in steps {
        step(&mut state);
        assert!((state.min()..=state.max()).contains(&state.current()));
    }
}

#[test]
fn test_single_layer_never_moves() {
    let mut state = LayerState::for_layer_count(1);
    state.inc(1);
    state.rotate(&[0, 1, 2]);
    state.set(1);
    assert_eq!(state.current(), 0);
}
