//! DOTA annotation files.
//!
//! Each object line reads `x1 y1 x2 y2 x3 y3 x4 y4 category difficult`.
//! Files may start with `imagesource:` and `gsd:` metadata lines.

use crate::{boxes::OrientedBox, common::*};

/// The DOTA v1.0 categories. The class index of a category is its position
/// plus one, leaving 0 to the background.
pub static DOTA_CLASSES: Lazy<IndexSet<&'static str>> = Lazy::new(|| {
    [
        "plane",
        "baseball-diamond",
        "bridge",
        "ground-track-field",
        "small-vehicle",
        "large-vehicle",
        "ship",
        "tennis-court",
        "basketball-court",
        "storage-tank",
        "soccer-ball-field",
        "roundabout",
        "harbor",
        "swimming-pool",
        "helicopter",
    ]
    .into_iter()
    .collect()
});

pub fn class_index(category: &str) -> Option<usize> {
    DOTA_CLASSES.get_index_of(category).map(|index| index + 1)
}

pub fn class_name(class: usize) -> Option<&'static str> {
    let index = class.checked_sub(1)?;
    DOTA_CLASSES.get_index(index).copied()
}

/// An annotated object.
#[derive(Debug, Clone, PartialEq)]
pub struct DotaObject {
    pub label: OrientedBox,
    pub difficult: bool,
}

/// The content of a label file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DotaAnnotation {
    pub image_source: Option<String>,
    pub gsd: Option<String>,
    pub objects: Vec<DotaObject>,
}

impl DotaAnnotation {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read label file '{}'", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("failed to parse label file '{}'", path.display()))
    }

    /// Parse label text. Objects of unknown categories are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut annotation = Self::default();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(source) = line.strip_prefix("imagesource:") {
                annotation.image_source = Some(source.to_owned());
                continue;
            }
            if let Some(gsd) = line.strip_prefix("gsd:") {
                annotation.gsd = Some(gsd.to_owned());
                continue;
            }

            let fields: Vec<_> = line.split_whitespace().collect();
            ensure!(
                fields.len() == 9 || fields.len() == 10,
                "line {}: expect 9 or 10 fields, but get {}",
                line_no + 1,
                fields.len()
            );

            let coords: Vec<f64> = fields[0..8]
                .iter()
                .map(|field| {
                    field.parse::<f64>().with_context(|| {
                        format!("line {}: invalid coordinate '{}'", line_no + 1, field)
                    })
                })
                .try_collect()?;
            let coords: [f64; 8] = coords
                .try_into()
                .map_err(|_| format_err!("line {}: expect 8 coordinates", line_no + 1))?;

            let category = fields[8];
            let class = match class_index(category) {
                Some(class) => class,
                None => {
                    warn!(
                        "line {}: skip object of unknown category '{}'",
                        line_no + 1,
                        category
                    );
                    continue;
                }
            };

            let difficult = match fields.get(9) {
                Some(&"0") | None => false,
                Some(&"1") => true,
                Some(flag) => bail!("line {}: invalid difficult flag '{}'", line_no + 1, flag),
            };

            annotation.objects.push(DotaObject {
                label: Label {
                    rect: Quad::from_xy8(coords),
                    class,
                },
                difficult,
            });
        }

        Ok(annotation)
    }

    pub fn boxes(&self) -> Vec<OrientedBox> {
        self.objects.iter().map(|obj| obj.label.clone()).collect()
    }

    /// Replace the boxes of the objects, in order.
    pub fn with_boxes(&self, boxes: Vec<OrientedBox>) -> Result<Self> {
        ensure!(
            boxes.len() == self.objects.len(),
            "expect {} boxes, but get {}",
            self.objects.len(),
            boxes.len()
        );

        let objects = self
            .objects
            .iter()
            .zip_eq(boxes)
            .map(|(obj, label)| DotaObject {
                label,
                difficult: obj.difficult,
            })
            .collect();

        Ok(Self {
            image_source: self.image_source.clone(),
            gsd: self.gsd.clone(),
            objects,
        })
    }

    pub fn to_text(&self) -> Result<String> {
        let mut text = String::new();

        if let Some(source) = &self.image_source {
            text.push_str(&format!("imagesource:{}\n", source));
        }
        if let Some(gsd) = &self.gsd {
            text.push_str(&format!("gsd:{}\n", gsd));
        }

        for obj in &self.objects {
            let DotaObject {
                label: Label { rect, class },
                difficult,
            } = obj;
            let category = class_name(*class)
                .ok_or_else(|| format_err!("class index {} is not a DOTA category", class))?;
            let coords = rect.to_xy8().iter().map(|value| value.to_string()).join(" ");
            text.push_str(&format!(
                "{} {} {}\n",
                coords,
                category,
                if *difficult { 1 } else { 0 }
            ));
        }

        Ok(text)
    }

    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        fs::write(path, self.to_text()?)
            .with_context(|| format!("unable to write label file '{}'", path.display()))?;
        Ok(())
    }
}
