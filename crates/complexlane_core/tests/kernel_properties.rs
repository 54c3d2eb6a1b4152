use complexlane_core::{axpb, mul, scale_inplace, ArrayHandle, ComplexBuffer, KernelError, Sample};

const TOLERANCE: f32 = 1e-5;

fn assert_close(actual: &[Sample], expected: &[Sample]) {
    assert_eq!(actual.len(), expected.len(), "length differs");
    for (index, (lhs, rhs)) in actual.iter().zip(expected).enumerate() {
        let scale = 1.0_f32.max(rhs.norm());
        assert!(
            (lhs - rhs).norm() <= TOLERANCE * scale,
            "sample {index}: {lhs} != {rhs}"
        );
    }
}

fn mixed_samples() -> Vec<Sample> {
    vec![
        Sample::new(1.0, 2.0),
        Sample::new(-3.5, 0.25),
        Sample::new(0.0, -1.0),
        Sample::new(1e3, -7e2),
        Sample::new(-0.125, 0.0),
    ]
}

#[test]
fn scaling_then_dividing_restores_input() {
    let original = mixed_samples();
    for alpha in [
        Sample::new(0.5, 0.25),
        Sample::new(-2.0, 0.0),
        Sample::new(0.0, 3.0),
        Sample::new(1e-2, -4.0),
    ] {
        let mut data = original.clone();
        scale_inplace(&mut ArrayHandle::from_samples_mut(&mut data), alpha)
            .expect("writable contiguous input");
        let restored: Vec<Sample> = data.iter().map(|z| z / alpha).collect();
        assert_close(&restored, &original);
    }
}

#[test]
fn axpb_with_unit_scale_and_zero_offset_is_identity() {
    let x = mixed_samples();
    let y = axpb(
        &ArrayHandle::from_samples(&x),
        Sample::new(1.0, 0.0),
        Sample::new(0.0, 0.0),
    )
    .expect("contiguous input");
    assert_eq!(y.as_slice(), x.as_slice());
}

#[test]
fn axpb_with_zero_scale_fills_offset() {
    let x = mixed_samples();
    let b = Sample::new(4.0, -2.0);
    let y = axpb(&ArrayHandle::from_samples(&x), Sample::new(0.0, 0.0), b)
        .expect("contiguous input");
    assert_eq!(y.len(), x.len());
    assert!(y.as_slice().iter().all(|&z| z == b));
}

#[test]
fn axpb_matches_worked_example() {
    let x = [Sample::new(1.0, 2.0), Sample::new(3.0, -1.0)];
    let y = axpb(
        &ArrayHandle::from_samples(&x),
        Sample::new(2.0, 0.0),
        Sample::new(0.0, 1.0),
    )
    .expect("contiguous input");
    assert_eq!(y.into_vec(), vec![Sample::new(2.0, 5.0), Sample::new(6.0, -1.0)]);
}

#[test]
fn axpb_does_not_mutate_input() {
    let x = mixed_samples();
    let before = x.clone();
    let _ = axpb(
        &ArrayHandle::from_samples(&x),
        Sample::new(3.0, 3.0),
        Sample::new(1.0, 1.0),
    )
    .expect("contiguous input");
    assert_eq!(x, before);
}

#[test]
fn mul_is_commutative() {
    let x = mixed_samples();
    let y: Vec<Sample> = x.iter().rev().map(|z| z.conj() * 0.5).collect();
    let xy = mul(&ArrayHandle::from_samples(&x), &ArrayHandle::from_samples(&y))
        .expect("equal lengths");
    let yx = mul(&ArrayHandle::from_samples(&y), &ArrayHandle::from_samples(&x))
        .expect("equal lengths");
    assert_close(xy.as_slice(), yx.as_slice());
}

#[test]
fn mul_accepts_the_same_handle_twice() {
    let x = mixed_samples();
    let handle = ArrayHandle::from_samples(&x);
    let squared = mul(&handle, &handle).expect("same handle has equal lengths");
    let expected: Vec<Sample> = x.iter().map(|z| z * z).collect();
    assert_close(squared.as_slice(), &expected);
}

#[test]
fn mul_rejects_mismatched_lengths() {
    let x = vec![Sample::new(1.0, 0.0); 3];
    let y = vec![Sample::new(1.0, 0.0); 5];
    let err = mul(&ArrayHandle::from_samples(&x), &ArrayHandle::from_samples(&y))
        .expect_err("3 vs 5 must fail");
    assert_eq!(err, KernelError::LengthMismatch { left: 3, right: 5 });
}

#[test]
fn empty_inputs_produce_empty_results() {
    let mut empty: Vec<Sample> = Vec::new();
    scale_inplace(
        &mut ArrayHandle::from_samples_mut(&mut empty),
        Sample::new(2.0, 0.0),
    )
    .expect("empty input is valid");

    let y = axpb(
        &ArrayHandle::from_samples(&empty),
        Sample::new(2.0, 0.0),
        Sample::new(1.0, 0.0),
    )
    .expect("empty input is valid");
    assert!(y.is_empty());

    let z = mul(&y.handle(), &ArrayHandle::from_samples(&empty)).expect("both empty");
    assert_eq!(z, ComplexBuffer::new());
}

#[test]
fn demo_pipeline_produces_expected_values() {
    let mut x: Vec<Sample> = (0..8).map(|k| Sample::new(k as f32, k as f32)).collect();
    scale_inplace(
        &mut ArrayHandle::from_samples_mut(&mut x),
        Sample::new(0.5, 0.25),
    )
    .expect("writable contiguous input");
    // (k + ki)(0.5 + 0.25i) = 0.25k + 0.75ki
    let expected_x: Vec<Sample> = (0..8)
        .map(|k| Sample::new(0.25 * k as f32, 0.75 * k as f32))
        .collect();
    assert_close(&x, &expected_x);

    let y = axpb(
        &ArrayHandle::from_samples(&x),
        Sample::new(2.0, 0.0),
        Sample::new(1.0, -1.0),
    )
    .expect("contiguous input");
    let expected_y: Vec<Sample> = (0..8)
        .map(|k| Sample::new(0.5 * k as f32 + 1.0, 1.5 * k as f32 - 1.0))
        .collect();
    assert_close(y.as_slice(), &expected_y);

    let z = mul(&ArrayHandle::from_samples(&x), &y.handle()).expect("equal lengths");
    let expected_z: Vec<Sample> = expected_x
        .iter()
        .zip(&expected_y)
        .map(|(lhs, rhs)| lhs * rhs)
        .collect();
    assert_close(z.as_slice(), &expected_z);
}
