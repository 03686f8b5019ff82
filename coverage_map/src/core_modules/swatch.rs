// THEORY:
// A swatch is the small colored square printed next to each game in a map's key.
// Swatch images are antialiased too, so averaging them would produce a color that
// appears nowhere on the map. The legend key for a swatch is instead its *mode*: the
// single most frequent color among its pixels, which is the flat fill the map itself
// uses for that game's region.
//
// Ties are broken by first appearance in row-major order, so the same swatch always
// produces the same key.

use crate::core_modules::color_key::ColorKey;
use crate::core_modules::event_record::EventRecord;
use crate::core_modules::legend::Legend;
use crate::core_modules::pixel_buffer::{PixelBuffer, Point};
use crate::error::LegendError;
use std::collections::HashMap;

/// Most frequent color in `colors`; earliest wins a tie. `None` when empty.
pub fn dominant_color<I>(colors: I) -> Option<ColorKey>
where
    I: IntoIterator<Item = ColorKey>,
{
    // color -> (count, first position)
    let mut tally: HashMap<ColorKey, (usize, usize)> = HashMap::new();
    for (position, color) in colors.into_iter().enumerate() {
        tally.entry(color).or_insert((0, position)).0 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| color)
}

/// Dominant color of a whole buffer, scanned row by row.
pub fn dominant_color_of<B: PixelBuffer + ?Sized>(swatch: &B) -> Option<ColorKey> {
    let (width, height) = (swatch.width(), swatch.height());
    dominant_color(
        (0..height).flat_map(move |y| (0..width).map(move |x| swatch.color_at(Point::new(x, y)))),
    )
}

/// Assembles a legend from (swatch image, record) pairs.
#[derive(Debug, Default)]
pub struct LegendBuilder {
    legend: Legend,
}

impl LegendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `record` under its swatch's dominant color and returns that color.
    pub fn add_swatch<B: PixelBuffer + ?Sized>(
        &mut self,
        swatch: &B,
        record: EventRecord,
    ) -> Result<ColorKey, LegendError> {
        let color = dominant_color_of(swatch).ok_or(LegendError::EmptySwatch)?;
        self.legend.insert(color, record)?;
        Ok(color)
    }

    pub fn build(self) -> Legend {
        self.legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel_buffer::RasterGrid;
    use image::{Rgba, RgbaImage};

    const FILL: ColorKey = ColorKey::opaque(30, 90, 160);
    const EDGE: ColorKey = ColorKey::opaque(120, 140, 170);
    const OTHER: ColorKey = ColorKey::opaque(5, 5, 5);

    #[test]
    fn mode_beats_antialiased_edges() {
        // 4x4 swatch: solid interior, blended border.
        let mut swatch = RasterGrid::filled(4, 4, EDGE);
        for y in 1..3 {
            for x in 0..4 {
                swatch.set(Point::new(x, y), FILL);
            }
        }
        swatch.set(Point::new(0, 0), FILL);

        assert_eq!(dominant_color_of(&swatch), Some(FILL));
    }

    #[test]
    fn ties_go_to_the_first_color_seen() {
        assert_eq!(dominant_color([OTHER, FILL, FILL, OTHER]), Some(OTHER));
        assert_eq!(dominant_color([FILL, OTHER, OTHER, FILL]), Some(FILL));
        assert_eq!(dominant_color([EDGE, FILL, OTHER]), Some(EDGE));
    }

    #[test]
    fn empty_sample_has_no_dominant_color() {
        assert_eq!(dominant_color(Vec::new()), None);
        assert_eq!(dominant_color_of(&RasterGrid::filled(0, 3, FILL)), None);
    }

    #[test]
    fn builder_keys_records_by_swatch_color() {
        let first = RgbaImage::from_pixel(3, 3, Rgba::from(FILL));
        let second = RasterGrid::filled(2, 2, OTHER);

        let mut builder = LegendBuilder::new();
        let first_key = builder
            .add_swatch(&first, EventRecord::new("Sunday", "Eagles @ Giants"))
            .unwrap();
        let second_key = builder
            .add_swatch(&second, EventRecord::new("Sunday", "Bears @ Packers"))
            .unwrap();
        let legend = builder.build();

        assert_eq!(first_key, FILL);
        assert_eq!(second_key, OTHER);
        assert_eq!(legend.get(&FILL).unwrap().matchup, "Eagles @ Giants");
        assert_eq!(legend.len(), 2);
    }

    #[test]
    fn builder_rejects_empty_and_repeated_swatches() {
        let mut builder = LegendBuilder::new();
        let empty = RasterGrid::filled(0, 0, FILL);
        assert!(matches!(
            builder.add_swatch(&empty, EventRecord::new("Sunday", "A@B")),
            Err(LegendError::EmptySwatch)
        ));

        let swatch = RasterGrid::filled(2, 2, FILL);
        builder.add_swatch(&swatch, EventRecord::new("Sunday", "A@B")).unwrap();
        assert!(matches!(
            builder.add_swatch(&swatch, EventRecord::new("Sunday", "C@D")),
            Err(LegendError::DuplicateColor(color)) if color == FILL
        ));
    }
}
