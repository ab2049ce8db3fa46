//! ASCII rendering and export of the terrain map
//!
//! The dump format is consumed by external tooling and is byte-exact: one
//! line per row, the row index and a tab, then one glyph per column with no
//! separators.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::world::WorldBuilder;

/// Write the terrain dump for a generated world.
pub fn render<W: Write>(out: &mut W, world: &WorldBuilder) -> io::Result<()> {
    let dim = world.dimension();
    for y in 0..dim {
        write!(out, "{}\t", y)?;
        for x in 0..dim {
            write!(out, "{}", world.grid().at(x, y).terrain.glyph())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The terrain dump as an in-memory string.
pub fn render_string(world: &WorldBuilder) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    render(&mut buffer, world).expect("in-memory render failed");
    String::from_utf8(buffer).expect("terrain glyphs are ASCII")
}

/// Export the terrain dump to a file.
pub fn export_file(world: &WorldBuilder, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    render(&mut writer, world)?;
    writer.flush()
}

/// Timestamped default filename for a dump export.
pub fn default_dump_filename() -> String {
    format!("terrain_{}.txt", Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Terrain;
    use crate::config::MapParams;

    fn small_world() -> WorldBuilder {
        let mut params = MapParams::default();
        params.dimension = 8;
        WorldBuilder::new(params).unwrap()
    }

    #[test]
    fn test_dump_shape() {
        let mut world = small_world();
        world.generate(3).unwrap();

        let dump = render_string(&world);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 8);
        for (y, line) in lines.iter().enumerate() {
            let (index, glyphs) = line.split_once('\t').expect("row index and tab");
            assert_eq!(index, y.to_string());
            assert_eq!(glyphs.chars().count(), 8);
        }
    }

    #[test]
    fn test_dump_glyphs_match_terrain() {
        let world = small_world();
        // Ungenerated world: everything unassigned.
        let dump = render_string(&world);
        let first = dump.lines().next().unwrap();
        assert_eq!(first, format!("0\t{}", "!".repeat(8)));
        assert_eq!(Terrain::Unassigned.glyph(), '!');
    }
}
