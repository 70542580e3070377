use anyhow::Result;
use ndarray::{array, Array3, ArrayD, IxDyn};
use rand::{rngs::StdRng, SeedableRng};
use rotdet_preproc::{
    boxes::{self, CoordRounding},
    image_ops,
    processor::{
        flip_left_right, AspectRatioJitterInit, RandomFlipInit, ShortSideResizeInit,
    },
    PreprocessError, PreprocessorConfig,
};

#[test]
fn short_side_resize_scenario() -> Result<()> {
    let resize = ShortSideResizeInit {
        target_short_side: 300,
        max_length: 1200,
        rounding: CoordRounding::Floor,
    }
    .build()?;
    let image = Array3::<f32>::zeros((600, 900, 3));
    let boxes = boxes::boxes_from_array(
        array![[100.0, 100.0, 200.0, 100.0, 200.0, 200.0, 100.0, 200.0, 5.0]].view(),
    )?;

    let (new_image, new_boxes, size) = resize.forward(image.view(), &boxes)?;
    assert_eq!(new_image.dim(), (300, 450, 3));
    assert_eq!(size.hw(), [300, 450]);
    assert_eq!(
        boxes::boxes_to_array(&new_boxes),
        array![[50.0, 50.0, 100.0, 50.0, 100.0, 100.0, 50.0, 100.0, 5.0]]
    );
    Ok(())
}

#[test]
fn square_image_scenario() -> Result<()> {
    let resize = ShortSideResizeInit {
        target_short_side: 400,
        max_length: 1200,
        rounding: CoordRounding::Floor,
    }
    .build()?;
    let image = Array3::<f32>::zeros((500, 500, 3));
    let (new_image, _, size) = resize.forward(image.view(), &[])?;
    assert_eq!(size.hw(), [400, 400]);
    assert_eq!(new_image.dim(), (400, 400, 3));
    Ok(())
}

#[test]
fn resized_box_reaches_resized_edge() -> Result<()> {
    let resize = ShortSideResizeInit {
        target_short_side: 115,
        max_length: 800,
        rounding: CoordRounding::Floor,
    }
    .build()?;
    let image = Array3::<f32>::zeros((100, 100, 3));
    let boxes = boxes::boxes_from_array(
        array![[0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0, 1.0]].view(),
    )?;

    let (_, new_boxes, size) = resize.forward(image.view(), &boxes)?;
    assert_eq!(size.hw(), [115, 115]);
    assert_eq!(
        boxes::boxes_to_array(&new_boxes),
        array![[0.0, 0.0, 115.0, 0.0, 115.0, 115.0, 0.0, 115.0, 1.0]]
    );
    Ok(())
}

#[test]
fn flip_scenario_and_involution() -> Result<()> {
    let image = Array3::from_shape_fn((4, 900, 3), |(y, x, c)| (y * 1000 + x + c) as f32);
    let boxes = boxes::boxes_from_array(
        array![[100.0, 10.0, 200.0, 10.0, 200.0, 20.0, 100.0, 20.0, 2.0]].view(),
    )?;

    let (flipped_image, flipped_boxes) = flip_left_right(image.view(), &boxes)?;
    assert_eq!(flipped_boxes[0].rect.xs(), [800.0, 700.0, 700.0, 800.0]);
    assert_eq!(flipped_boxes[0].rect.ys(), [10.0, 10.0, 20.0, 20.0]);
    assert_eq!(flipped_boxes[0].class, 2);

    let (image_back, boxes_back) = flip_left_right(flipped_image.view(), &flipped_boxes)?;
    assert_eq!(image_back, image);
    assert_eq!(boxes_back, boxes);
    Ok(())
}

#[test]
fn resize_keeps_boxes_within_one_pixel() -> Result<()> {
    let resize = ShortSideResizeInit {
        target_short_side: 800,
        max_length: 1333,
        rounding: CoordRounding::Floor,
    }
    .build()?;
    let image = Array3::<f32>::zeros((1023, 1379, 3));
    let orig = array![
        [13.0, 7.0, 977.0, 31.0, 1001.0, 640.0, 3.0, 1022.0, 1.0],
        [500.5, 200.25, 700.0, 210.0, 690.0, 400.0, 495.0, 390.0, 9.0],
    ];
    let boxes = boxes::boxes_from_array(orig.view())?;

    let (new_image, new_boxes, size) = resize.forward(image.view(), &boxes)?;
    let (new_h, new_w, _) = new_image.dim();
    assert_eq!([new_h, new_w], size.hw());
    assert_eq!(new_h, 800);

    let sx = new_w as f64 / 1379.0;
    let sy = new_h as f64 / 1023.0;
    let out = boxes::boxes_to_array(&new_boxes);
    for (row_in, row_out) in orig.outer_iter().zip(out.outer_iter()) {
        for col in 0..8 {
            let scale = if col % 2 == 0 { sx } else { sy };
            let expect = row_in[col] * scale;
            assert!((row_out[col] - expect).abs() <= 1.0);
        }
        assert_eq!(row_in[8], row_out[8]);
    }
    Ok(())
}

#[test]
fn random_flip_rate() -> Result<()> {
    let flip = RandomFlipInit::default().build();
    let image = Array3::<f32>::zeros((2, 10, 1));
    let boxes = boxes::boxes_from_array(
        array![[1.0, 0.0, 2.0, 0.0, 2.0, 1.0, 1.0, 1.0, 0.0]].view(),
    )?;
    let mut rng = StdRng::seed_from_u64(2024);

    let trials = 10_000;
    let mut flips = 0;
    for _ in 0..trials {
        let (_, new_boxes) = flip.forward(&mut rng, image.view(), &boxes)?;
        if new_boxes[0].rect.xs()[0] == 9.0 {
            flips += 1;
        }
    }
    let rate = flips as f64 / trials as f64;
    assert!((rate - 0.5).abs() < 0.03, "flip rate {}", rate);
    Ok(())
}

#[test]
fn jitter_preserves_box_count_and_labels() -> Result<()> {
    let jitter = AspectRatioJitterInit::default().build()?;
    let image = Array3::<f32>::zeros((120, 80, 3));
    let orig = array![
        [1.0, 2.0, 30.0, 2.0, 30.0, 40.0, 1.0, 40.0, 3.0],
        [50.0, 60.0, 70.0, 60.0, 70.0, 110.0, 50.0, 110.0, 1.0],
        [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 7.0],
    ];
    let boxes = boxes::boxes_from_array(orig.view())?;
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..50 {
        let (new_image, new_boxes) = jitter.forward(&mut rng, image.view(), &boxes)?;
        let (h, w, _) = new_image.dim();
        assert!(h >= w);
        let classes: Vec<_> = new_boxes.iter().map(|b| b.class).collect();
        assert_eq!(classes, [3, 1, 7]);
    }
    Ok(())
}

#[test]
fn config_driven_pipeline() -> Result<()> {
    let config: PreprocessorConfig = json5::from_str(
        r#"{
            target_short_side: 300,
            max_length: 1200,
            horizontal_flip: false,
        }"#,
    )?;
    let preprocessor = config.build()?;
    let mut rng = StdRng::seed_from_u64(0);

    let image = ArrayD::<f32>::zeros(IxDyn(&[600, 900, 3]));
    let boxes = array![[100.0, 100.0, 200.0, 100.0, 200.0, 200.0, 100.0, 200.0, 5.0]];
    let (new_image, new_boxes, size) = preprocessor.forward_arrays(&mut rng, image, boxes.view())?;

    assert_eq!(new_image.dim(), (300, 450, 3));
    assert_eq!(size.hw(), [300, 450]);
    assert_eq!(
        new_boxes,
        array![[50.0, 50.0, 100.0, 50.0, 100.0, 100.0, 50.0, 100.0, 5.0]]
    );

    let inference = preprocessor.forward_inference(image_ops::image_from_dyn(
        ArrayD::<f32>::zeros(IxDyn(&[500, 500, 3])),
    )?
    .view(), true)?;
    assert_eq!(inference.dim(), (300, 300, 3));
    Ok(())
}

#[test]
fn rejects_bad_inputs() {
    let preprocessor = PreprocessorConfig::default().build().unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let flat = ArrayD::<f32>::zeros(IxDyn(&[10]));
    let boxes = ndarray::Array2::<f64>::zeros((0, 9));
    let err = preprocessor
        .forward_arrays(&mut rng, flat, boxes.view())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PreprocessError>(),
        Some(PreprocessError::InvalidShape(_))
    ));

    let empty = ArrayD::<f32>::zeros(IxDyn(&[0, 10, 3]));
    let err = preprocessor
        .forward_arrays(&mut rng, empty, boxes.view())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PreprocessError>(),
        Some(PreprocessError::DegenerateInput(_))
    ));
}
