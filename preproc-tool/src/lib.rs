//! The dataset preprocessing program for the rotdet-preproc project.

pub mod common;
pub mod config;

use crate::{common::*, config::Config};

/// An image file with its label file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub image_file: PathBuf,
    pub label_file: Option<PathBuf>,
}

/// The entry of preprocessing program.
pub async fn start(config: Arc<Config>) -> Result<()> {
    let start_time = Instant::now();
    let Config {
        dataset,
        output,
        preprocessor,
    } = &*config;

    let preprocessor = Arc::new(preprocessor.build()?);
    let image_dir = Arc::new(output.output_dir.join("images"));
    let label_dir = Arc::new(output.output_dir.join("labelTxt"));
    tokio::fs::create_dir_all(&*image_dir).await?;
    if !dataset.inference_only {
        tokio::fs::create_dir_all(&*label_dir).await?;
    }

    // list samples
    info!("loading dataset from '{}'", dataset.dataset_dir.display());
    let samples = list_samples(
        &dataset.dataset_dir,
        &dataset.image_ext,
        !dataset.inference_only,
    )?;
    let num_samples = samples.len();
    info!("found {} samples", num_samples);

    // process samples in parallel
    let seed = output.seed;
    let par_config = output
        .num_workers
        .map(|num_workers| ParParamsConfig::FixedWorkers { num_workers });
    stream::iter(samples.into_iter().enumerate())
        .par_map(par_config, move |(index, sample)| {
            let preprocessor = preprocessor.clone();
            let image_dir = image_dir.clone();
            let label_dir = label_dir.clone();

            move || -> Result<_> {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                    None => StdRng::from_entropy(),
                };
                process_sample(&preprocessor, &mut rng, &sample, &image_dir, &label_dir)
                    .with_context(|| {
                        format!("failed to process '{}'", sample.image_file.display())
                    })
            }
        })
        .try_collect::<Vec<_>>()
        .await?;

    info!(
        "processed {} samples in {:.2?}",
        num_samples,
        start_time.elapsed()
    );

    Ok(())
}

/// List images under `<dataset_dir>/images` with labels under `<dataset_dir>/labelTxt`.
///
/// If `require_labels` is set, images without a label file are skipped.
pub fn list_samples(
    dataset_dir: &Path,
    image_ext: &str,
    require_labels: bool,
) -> Result<Vec<Sample>> {
    let pattern = dataset_dir.join("images").join(format!("*.{}", image_ext));
    let pattern = pattern
        .to_str()
        .ok_or_else(|| format_err!("non-UTF-8 path '{}'", pattern.display()))?;
    let label_dir = dataset_dir.join("labelTxt");

    let mut samples = vec![];
    for image_file in glob::glob(pattern)? {
        let image_file = image_file?;

        if !require_labels {
            samples.push(Sample {
                image_file,
                label_file: None,
            });
            continue;
        }

        let stem = image_file
            .file_stem()
            .ok_or_else(|| format_err!("invalid image file name '{}'", image_file.display()))?;
        let label_file = label_dir.join(format!("{}.txt", stem.to_string_lossy()));
        if !label_file.is_file() {
            warn!(
                "skip '{}' since the label file '{}' does not exist",
                image_file.display(),
                label_file.display()
            );
            continue;
        }

        samples.push(Sample {
            image_file,
            label_file: Some(label_file),
        });
    }
    samples.sort_by(|lhs, rhs| lhs.image_file.cmp(&rhs.image_file));

    Ok(samples)
}

/// Run the pipeline on one sample and write the outcome image and label files.
pub fn process_sample<R>(
    preprocessor: &Preprocessor,
    rng: &mut R,
    sample: &Sample,
    image_dir: &Path,
    label_dir: &Path,
) -> Result<()>
where
    R: Rng,
{
    let Sample {
        image_file,
        label_file,
    } = sample;
    let stem = image_file
        .file_stem()
        .ok_or_else(|| format_err!("invalid image file name '{}'", image_file.display()))?
        .to_string_lossy();

    let rgb = image::open(image_file)?.to_rgb8();
    let image = image_ops::from_rgb_image(&rgb)?;

    let new_image = match label_file {
        Some(label_file) => {
            let annotation = DotaAnnotation::open(label_file)?;
            let output = preprocessor.forward_with_rng(rng, image.view(), &annotation.boxes())?;
            let new_annotation = annotation.with_boxes(output.boxes)?;
            new_annotation.save(label_dir.join(format!("{}.txt", stem)))?;
            output.image
        }
        None => preprocessor.forward_inference(image.view(), true)?,
    };

    let (new_h, new_w, _) = new_image.dim();
    debug!(
        "{}: {}x{} -> {}x{}",
        image_file.display(),
        rgb.height(),
        rgb.width(),
        new_h,
        new_w
    );

    image_ops::to_rgb_image(new_image.view())?
        .save(image_dir.join(format!("{}.png", stem)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepare_dataset(name: &str) -> Result<PathBuf> {
        let dir = std::env::temp_dir().join(format!(
            "preproc-tool-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("images"))?;
        fs::create_dir_all(dir.join("labelTxt"))?;

        let rgb = image::RgbImage::from_fn(90, 60, |x, y| image::Rgb([x as u8, y as u8, 0]));
        rgb.save(dir.join("images").join("P0001.png"))?;
        rgb.save(dir.join("images").join("P0002.png"))?;
        fs::write(
            dir.join("labelTxt").join("P0001.txt"),
            "imagesource:GoogleEarth\ngsd:0.1\n10 10 20 10 20 20 10 20 plane 0\n",
        )?;

        Ok(dir)
    }

    #[test]
    fn list_samples_requires_labels() -> Result<()> {
        let dir = prepare_dataset("list")?;

        let samples = list_samples(&dir, "png", true)?;
        assert_eq!(samples.len(), 1);
        assert!(samples[0].image_file.ends_with("images/P0001.png"));
        assert!(samples[0].label_file.as_ref().unwrap().ends_with("labelTxt/P0001.txt"));

        let samples = list_samples(&dir, "png", false)?;
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().all(|sample| sample.label_file.is_none()));

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn process_sample_writes_outputs() -> Result<()> {
        let dir = prepare_dataset("process")?;
        let output_dir = dir.join("output");
        fs::create_dir_all(&output_dir)?;

        let preprocessor = PreprocessorConfig {
            target_short_side: 30,
            max_length: 100,
            horizontal_flip: false,
            ..Default::default()
        }
        .build()?;
        let mut rng = StdRng::seed_from_u64(0);
        let samples = list_samples(&dir, "png", true)?;
        process_sample(&preprocessor, &mut rng, &samples[0], &output_dir, &output_dir)?;

        let out_image = image::open(output_dir.join("P0001.png"))?.to_rgb8();
        assert_eq!(out_image.dimensions(), (45, 30));

        let annotation = DotaAnnotation::open(output_dir.join("P0001.txt"))?;
        assert_eq!(annotation.objects.len(), 1);
        assert_eq!(
            annotation.objects[0].label.rect.to_xy8(),
            [5.0, 5.0, 10.0, 5.0, 10.0, 10.0, 5.0, 10.0]
        );
        assert_eq!(annotation.image_source.as_deref(), Some("GoogleEarth"));

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn start_keeps_dotted_file_stems() -> Result<()> {
        use crate::config::{DatasetConfig, OutputConfig};

        let dir = prepare_dataset("start")?;
        let rgb = image::RgbImage::new(90, 60);
        rgb.save(dir.join("images").join("P0003.v2.png"))?;
        fs::write(
            dir.join("labelTxt").join("P0003.v2.txt"),
            "20 20 40 20 40 40 20 40 ship 1\n",
        )?;
        let output_dir = dir.join("output");

        let config = Config {
            dataset: DatasetConfig {
                dataset_dir: dir.clone(),
                image_ext: "png".into(),
                inference_only: false,
            },
            output: OutputConfig {
                output_dir: output_dir.clone(),
                seed: Some(1),
                num_workers: Some(2),
            },
            preprocessor: PreprocessorConfig {
                target_short_side: 30,
                max_length: 100,
                horizontal_flip: false,
                ..Default::default()
            },
        };
        start(Arc::new(config)).await?;

        let samples = list_samples(&dir, "png", true)?;
        assert_eq!(samples.len(), 2);
        assert!(samples[1].label_file.as_ref().unwrap().ends_with("labelTxt/P0003.v2.txt"));

        let out_image = image::open(output_dir.join("images").join("P0003.v2.png"))?.to_rgb8();
        assert_eq!(out_image.dimensions(), (45, 30));
        assert!(!output_dir.join("images").join("P0003.png").exists());

        let annotation = DotaAnnotation::open(output_dir.join("labelTxt").join("P0003.v2.txt"))?;
        assert_eq!(
            annotation.objects[0].label.rect.to_xy8(),
            [10.0, 10.0, 20.0, 10.0, 20.0, 20.0, 10.0, 20.0]
        );
        assert!(annotation.objects[0].difficult);
        assert!(output_dir.join("labelTxt").join("P0001.txt").is_file());

        fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
