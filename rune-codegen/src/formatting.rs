//! Writing compiled glyphs as C source.
//!
//! The header declares an enum with the index, width, height, offset and
//! size of every glyph. The data file contains the offset and size tables
//! and the run-length encoded glyph data, and refers to the names declared
//! in the header.

use std::fmt::{Display, Formatter, Result};

use log::warn;
use rune_compiler::Compilation;

const INDENT: &str = "    ";
const NAME_WIDTH: usize = 20;
const NAMES_PER_LINE: usize = 4;
const BYTES_PER_LINE: usize = 16;

/// Which file to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    /// The enum of glyph indices and metrics
    Header,
    /// The offset, size and data tables
    Data,
}

/// Options that control the generated names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Prepended to every generated name, such as `RUNE` in `RUNE_A_WIDTH`.
    pub prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            prefix: "RUNE".into(),
        }
    }
}

/// Generate `artifact` for a compilation.
pub fn generate(artifact: Artifact, compilation: &Compilation, options: &Options) -> String {
    check_limits(compilation, options);
    let names = Names::new(&options.prefix);
    match artifact {
        Artifact::Header => Header { compilation, names }.to_string(),
        Artifact::Data => Data { compilation, names }.to_string(),
    }
}

/// Warn about values that will not fit the generated declarations.
fn check_limits(compilation: &Compilation, options: &Options) {
    if compilation.layout().is_empty() {
        warn!("no glyphs were defined, the generated tables will be empty");
    }
    for glyph in compilation.glyphs() {
        let entry = glyph.entry;
        if !is_c_identifier(&entry.id) {
            warn!(
                "'{}_{}' is not a valid C identifier",
                options.prefix, entry.id
            );
        }
        if entry.offset > u16::MAX as usize {
            warn!(
                "offset {} of glyph '{}' does not fit in an unsigned short",
                entry.offset, entry.id
            );
        }
        if entry.size > u8::MAX as usize {
            warn!(
                "size {} of glyph '{}' does not fit in an unsigned char",
                entry.size, entry.id
            );
        }
    }
}

fn is_c_identifier(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The naming convention for generated items.
#[derive(Clone, Copy, Debug)]
struct Names<'a> {
    prefix: &'a str,
}

impl<'a> Names<'a> {
    fn new(prefix: &'a str) -> Self {
        Names { prefix }
    }

    fn constant(&self, id: &str, suffix: Option<&str>) -> String {
        match suffix {
            Some(suffix) => format!("{}_{id}_{suffix}", self.prefix),
            None => format!("{}_{id}", self.prefix),
        }
    }

    fn count(&self) -> String {
        format!("{}_NUM", self.prefix)
    }

    fn table(&self, kind: &str) -> String {
        format!("{}_{kind}", self.prefix.to_ascii_lowercase())
    }

    /// `RUNE` becomes `Rune`
    fn type_name(&self) -> String {
        let mut chars = self.prefix.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    fn include_guard(&self) -> String {
        format!("__{}S__", self.prefix.to_ascii_uppercase())
    }
}

struct Header<'a> {
    compilation: &'a Compilation,
    names: Names<'a>,
}

struct Data<'a> {
    compilation: &'a Compilation,
    names: Names<'a>,
}

impl Display for Header<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let names = &self.names;
        let guard = names.include_guard();
        writeln!(f, "#ifndef {guard}")?;
        writeln!(f, "#define {guard}")?;
        writeln!(f, "enum {} {{", names.type_name())?;
        for glyph in self.compilation.glyphs() {
            let id = glyph.entry.id.as_str();
            write_value(f, &names.constant(id, None), glyph.entry.index)?;
            write_value(f, &names.constant(id, Some("WIDTH")), glyph.definition.width())?;
            write_value(f, &names.constant(id, Some("HEIGHT")), glyph.definition.height())?;
            write_value(f, &names.constant(id, Some("OFFSET")), glyph.entry.offset)?;
            write_value(f, &names.constant(id, Some("SIZE")), glyph.entry.size)?;
        }
        // no trailing comma after the last enumerator
        writeln!(
            f,
            "{INDENT}{:<width$} = {}",
            names.count(),
            self.compilation.layout().len(),
            width = NAME_WIDTH
        )?;
        writeln!(f, "}};")?;
        writeln!(f, "#endif // {guard}")
    }
}

fn write_value(f: &mut Formatter<'_>, name: &str, value: impl Display) -> Result {
    writeln!(f, "{INDENT}{name:<width$} = {value},", width = NAME_WIDTH)
}

impl Display for Data<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let names = &self.names;
        let count = names.count();
        let ids = self
            .compilation
            .glyphs()
            .map(|glyph| glyph.entry.id.as_str())
            .collect::<Vec<_>>();

        writeln!(
            f,
            "const unsigned short {}[{count}] = {{",
            names.table("offset")
        )?;
        write_name_list(f, ids.iter().map(|id| names.constant(id, Some("OFFSET"))))?;
        writeln!(f, "}};\n")?;

        writeln!(f, "const unsigned char {}[{count}] = {{", names.table("size"))?;
        write_name_list(f, ids.iter().map(|id| names.constant(id, Some("SIZE"))))?;
        writeln!(f, "}};\n")?;

        let total_size = self.compilation.total_size();
        writeln!(
            f,
            "// {} glyphs.  Total data size {total_size} bytes.",
            ids.len()
        )?;
        writeln!(
            f,
            "// This is run-length encoded.  One byte count, one byte value.  The exception is"
        )?;
        writeln!(f, "// a single 0 which represents one zero.")?;
        writeln!(f, "const unsigned char {}[] = {{", names.table("data"))?;

        let type_name = names.type_name();
        let mut written = 0;
        for glyph in self.compilation.glyphs() {
            let entry = glyph.entry;
            writeln!(
                f,
                "{INDENT}// {type_name}: {}, offset {}, size {}",
                entry.id, entry.offset, entry.size
            )?;
            for line in glyph.encoded.bytes().chunks(BYTES_PER_LINE) {
                f.write_str(INDENT)?;
                for byte in line {
                    written += 1;
                    // the last byte of the table has no trailing comma
                    if written == total_size {
                        write!(f, "0x{byte:02x}")?;
                    } else {
                        write!(f, "0x{byte:02x},")?;
                    }
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{INDENT}// End of list")?;
        writeln!(f, "}};")
    }
}

/// Write a comma separated list of names, a few to a line.
fn write_name_list(f: &mut Formatter<'_>, names: impl Iterator<Item = String>) -> Result {
    let names = names.collect::<Vec<_>>();
    if names.is_empty() {
        return Ok(());
    }
    let lines = names
        .chunks(NAMES_PER_LINE)
        .map(|line| line.join(", "))
        .collect::<Vec<_>>();
    writeln!(f, "{INDENT}{}", lines.join(&format!(",\n{INDENT}")))
}
