use tensile::{prelude::*, InvariantError};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn arange(shape: Shape) -> Tensor {
    let data = (0..shape.numel()).map(|x| x as f64).collect::<Vec<_>>();
    Tensor::from_data(data, shape).unwrap()
}

/// Offsets relative to the first element of the view.
fn view_offsets(t: &Tensor) -> Vec<usize> {
    t.iter_offsets().map(|o| o - t.offset()).collect()
}

#[test]
fn dense_iteration_is_sequential() {
    init();
    for shape in [shape![], shape![1], shape![4], shape![3, 3], shape![2, 3, 4]] {
        let t = arange(shape);
        let expected = (0..t.numel()).collect::<Vec<_>>();
        assert_eq!(view_offsets(&t), expected);
        assert_eq!(t.to_vec(), t.storage().read().as_slice());
    }
}

#[test]
fn index_into_vector_gives_scalar() -> anyhow::Result<()> {
    init();
    let t = Tensor::from_data([2.0, 1.0], shape![2])?;
    let v = t.slice(&s![0])?;
    assert_eq!(v.rank(), 0);
    assert_eq!(view_offsets(&v), vec![0]);
    assert_eq!(v.to_vec(), vec![2.0]);

    let v = t.slice(&s![1])?;
    assert_eq!(view_offsets(&v), vec![0]);
    assert_eq!(v.iter_offsets().collect::<Vec<_>>(), vec![1]);
    assert_eq!(v.to_vec(), vec![1.0]);
    Ok(())
}

#[test]
fn matrix_slices() -> anyhow::Result<()> {
    init();
    let t = arange(shape![3, 3]);

    let row = t.slice(&s![1..2])?;
    assert_eq!(view_offsets(&row), vec![0, 1, 2]);
    assert_eq!(row.to_vec(), vec![3.0, 4.0, 5.0]);

    let col = t.slice(&s![.., 1..2])?;
    assert_eq!(view_offsets(&col), vec![0, 3, 6]);
    assert_eq!(col.to_vec(), vec![1.0, 4.0, 7.0]);

    let sub = t.slice(&s![0..2, 0..2])?;
    assert_eq!(view_offsets(&sub), vec![0, 1, 3, 4]);
    assert_eq!(sub.shape(), &shape![2, 2]);

    let partial_row = t.slice(&s![0, 1..3])?;
    assert_eq!(view_offsets(&partial_row), vec![0, 1]);
    assert_eq!(partial_row.to_vec(), vec![1.0, 2.0]);
    Ok(())
}

#[test]
fn rank3_slices() -> anyhow::Result<()> {
    init();
    let t = arange(shape![2, 3, 4]);

    let v = t.slice(&s![.., 1..3])?;
    assert_eq!(v.shape(), &shape![2, 2, 4]);
    assert_eq!(
        view_offsets(&v),
        vec![0, 1, 2, 3, 4, 5, 6, 7, 12, 13, 14, 15, 16, 17, 18, 19]
    );

    let v = t.slice(&s![0, .., 2])?;
    assert_eq!(v.shape(), &shape![3]);
    assert_eq!(view_offsets(&v), vec![0, 4, 8]);
    assert_eq!(v.to_vec(), vec![2.0, 6.0, 10.0]);

    // The root is walked by the same machinery as its views.
    assert_eq!(view_offsets(&t), (0..24).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn materialize_detaches_from_source() -> anyhow::Result<()> {
    init();
    let t = arange(shape![3, 3]);
    let v = t.slice(&s![0..2, 0..2])?;

    let m = v.materialize();
    assert_eq!(m.storage().read().as_slice(), &[0.0, 1.0, 3.0, 4.0]);
    assert_eq!(m.shape(), v.shape());
    assert_eq!(m.strides().to_vec(), vec![2, 1]);
    assert_eq!(m.offset(), 0);

    v.storage().write()[0] = 5000.0;
    assert_eq!(v.get(&[0, 0])?, 5000.0);
    assert_eq!(m.storage().read().as_slice(), &[0.0, 1.0, 3.0, 4.0]);
    Ok(())
}

#[test]
fn materialize_root_returns_itself() {
    init();
    let t = arange(shape![3, 3]);
    let m = t.materialize();
    assert_eq!(m, t);
    assert_eq!(m.id(), t.id());
}

#[test]
fn exhausted_iterator_stays_exhausted() -> anyhow::Result<()> {
    init();
    let t = arange(shape![3, 3]);
    let v = t.slice(&s![.., 1..2])?;
    let mut it = v.iter_offsets();
    assert_eq!(it.by_ref().count(), 3);
    for _ in 0..4 {
        assert_eq!(it.next(), None);
    }
    assert!(it.is_exhausted());

    // A fresh iterator starts over.
    assert_eq!(v.iter_offsets().count(), 3);
    Ok(())
}

#[test]
fn slice_errors() {
    init();
    let t = arange(shape![3, 3]);
    assert!(t.slice(&s![3]).unwrap_err().is_out_of_bounds());
    assert!(t.slice(&s![.., 0..4]).unwrap_err().is_out_of_bounds());
    assert!(t.slice(&s![0, 0, 0]).unwrap_err().is_out_of_bounds());
    assert!(matches!(
        t.slice(&[SliceSpec::range(2, 2)]),
        Err(InvariantError::InvalidRange { .. })
    ));
    assert!(matches!(
        t.slice(&[SliceSpec::stepped(0, 2, 0)]),
        Err(InvariantError::InvalidRange { .. })
    ));

    let scalar = t.slice(&s![1, 1]).unwrap();
    let same = scalar.slice(&s![0]).unwrap();
    assert_eq!(same.to_vec(), vec![4.0]);
    assert!(scalar.slice(&s![2]).unwrap_err().is_out_of_bounds());
}

#[test]
fn stepped_slice_materializes() -> anyhow::Result<()> {
    init();
    let t = arange(shape![4, 6]);
    let v = t.slice(&[SliceSpec::stepped(1, 4, 2), SliceSpec::stepped(0, 6, 3)])?;
    assert_eq!(v.shape(), &shape![2, 2]);
    assert_eq!(v.materialize().to_vec(), vec![6.0, 9.0, 18.0, 21.0]);
    Ok(())
}

#[test]
fn views_are_shareable_across_threads() -> anyhow::Result<()> {
    init();
    let t = arange(shape![4, 4]);
    let handles = (0..4)
        .map(|row| -> anyhow::Result<_> {
            let v = t.slice(&s![row])?;
            Ok(std::thread::spawn(move || {
                for col in 0..4 {
                    let x = v.get(&[col]).unwrap();
                    v.set(&[col], x * 10.0).unwrap();
                }
            }))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    for h in handles {
        h.join().unwrap();
    }
    let expected = (0..16).map(|x| x as f64 * 10.0).collect::<Vec<_>>();
    assert_eq!(t.to_vec(), expected);
    Ok(())
}
