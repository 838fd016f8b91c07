//! PLY (Stanford polygon) reader.
//!
//! Supports ascii and binary_little_endian files, which covers the spider
//! asset and everything common tooling exports. Vertex elements must carry
//! `x`, `y`, `z` properties; any extra per-vertex properties (normals,
//! colors) are skipped. Face vertex lists are fan-triangulated.

use crate::{Mesh, Point, TriangleIndex};
use crate::geom::triangles::fan_triangulate;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
}

/// Scalar types a PLY property can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlyScalar {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl PlyScalar {
    fn parse(token: &str) -> Result<Self> {
        match token {
            "char" | "int8" => Ok(Self::Char),
            "uchar" | "uint8" => Ok(Self::UChar),
            "short" | "int16" => Ok(Self::Short),
            "ushort" | "uint16" => Ok(Self::UShort),
            "int" | "int32" => Ok(Self::Int),
            "uint" | "uint32" => Ok(Self::UInt),
            "float" | "float32" => Ok(Self::Float),
            "double" | "float64" => Ok(Self::Double),
            other => Err(anyhow!("Unsupported PLY scalar type: {}", other)),
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Char | Self::UChar => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// Decodes one little-endian value at `cursor`, advancing it.
    fn read_le(&self, data: &[u8], cursor: &mut usize) -> Result<f64> {
        let size = self.size();
        let bytes = data
            .get(*cursor..*cursor + size)
            .ok_or_else(|| anyhow!("Unexpected end of PLY binary data"))?;
        *cursor += size;

        let value = match self {
            Self::Char => bytes[0] as i8 as f64,
            Self::UChar => bytes[0] as f64,
            Self::Short => i16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            Self::UShort => u16::from_le_bytes([bytes[0], bytes[1]]) as f64,
            Self::Int => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Self::UInt => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Self::Float => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Self::Double => f64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]),
        };
        Ok(value)
    }
}

#[derive(Debug, Clone)]
enum PlyProperty {
    Scalar { name: String, kind: PlyScalar },
    List {
        name: String,
        count_kind: PlyScalar,
        item_kind: PlyScalar,
    },
}

#[derive(Debug, Clone)]
struct PlyElement {
    name: String,
    count: usize,
    properties: Vec<PlyProperty>,
}

/// Reads a PLY file into a mesh.
pub fn read_ply(path: &Path) -> Result<Mesh> {
    let data =
        fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let (format, elements, body_start) = parse_header(&data)
        .with_context(|| format!("Invalid PLY header in: {}", path.display()))?;

    let body = &data[body_start..];
    match format {
        PlyFormat::Ascii => {
            let text = std::str::from_utf8(body).context("PLY ascii body is not valid UTF-8")?;
            read_body_ascii(text, &elements)
        }
        PlyFormat::BinaryLittleEndian => read_body_binary(body, &elements),
    }
}

/// Parses the header; returns the format, element layout and body offset.
fn parse_header(data: &[u8]) -> Result<(PlyFormat, Vec<PlyElement>, usize)> {
    const END: &[u8] = b"end_header";
    let end_pos = data
        .windows(END.len())
        .position(|w| w == END)
        .ok_or_else(|| anyhow!("Missing end_header"))?;
    // Line terminator may be \n or \r\n
    let mut body_start = end_pos + END.len();
    if data.get(body_start) == Some(&b'\r') {
        body_start += 1;
    }
    if data.get(body_start) != Some(&b'\n') {
        return Err(anyhow!("Missing newline after end_header"));
    }
    body_start += 1;

    let header =
        std::str::from_utf8(&data[..end_pos]).context("PLY header is not valid UTF-8")?;
    let mut lines = header.lines();

    let magic = lines.next().ok_or_else(|| anyhow!("Empty header"))?;
    if magic.trim_end() != "ply" {
        return Err(anyhow!("Not a PLY file: missing ply magic"));
    }

    let mut format: Option<PlyFormat> = None;
    let mut elements: Vec<PlyElement> = Vec::new();

    for line in lines {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("format") => {
                format = Some(match parts.next() {
                    Some("ascii") => PlyFormat::Ascii,
                    Some("binary_little_endian") => PlyFormat::BinaryLittleEndian,
                    Some(other) => return Err(anyhow!("Unsupported PLY format: {}", other)),
                    None => return Err(anyhow!("Malformed format line")),
                });
            }
            Some("element") => {
                let name = parts
                    .next()
                    .ok_or_else(|| anyhow!("Element without a name"))?;
                let count: usize = parts
                    .next()
                    .ok_or_else(|| anyhow!("Element without a count"))?
                    .parse()
                    .context("Invalid element count")?;
                elements.push(PlyElement {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| anyhow!("Property before any element"))?;
                let kind_token = parts
                    .next()
                    .ok_or_else(|| anyhow!("Property without a type"))?;
                let property = if kind_token == "list" {
                    let count_kind = PlyScalar::parse(
                        parts.next().ok_or_else(|| anyhow!("List without count type"))?,
                    )?;
                    let item_kind = PlyScalar::parse(
                        parts.next().ok_or_else(|| anyhow!("List without item type"))?,
                    )?;
                    let name = parts.next().ok_or_else(|| anyhow!("List without a name"))?;
                    PlyProperty::List {
                        name: name.to_string(),
                        count_kind,
                        item_kind,
                    }
                } else {
                    let kind = PlyScalar::parse(kind_token)?;
                    let name = parts
                        .next()
                        .ok_or_else(|| anyhow!("Property without a name"))?;
                    PlyProperty::Scalar {
                        name: name.to_string(),
                        kind,
                    }
                };
                element.properties.push(property);
            }
            // comment, obj_info, blank
            _ => {}
        }
    }

    let format = format.ok_or_else(|| anyhow!("Missing format line"))?;
    Ok((format, elements, body_start))
}

/// Accumulates vertices and faces as element rows are decoded.
#[derive(Default)]
struct MeshBuilder {
    vertices: Vec<Point>,
    faces: Vec<TriangleIndex>,
}

impl MeshBuilder {
    fn push_vertex(&mut self, element: &PlyElement, scalars: &[f64]) -> Result<()> {
        let mut x: Option<f64> = None;
        let mut y: Option<f64> = None;
        let mut z: Option<f64> = None;
        let mut scalar_iter = scalars.iter();
        for prop in &element.properties {
            if let PlyProperty::Scalar { name, .. } = prop {
                let value = *scalar_iter
                    .next()
                    .ok_or_else(|| anyhow!("Vertex row shorter than its properties"))?;
                match name.as_str() {
                    "x" => x = Some(value),
                    "y" => y = Some(value),
                    "z" => z = Some(value),
                    _ => {}
                }
            }
        }
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => {
                self.vertices.push(Point::new(x, y, z));
                Ok(())
            }
            _ => Err(anyhow!("Vertex element is missing x/y/z properties")),
        }
    }

    fn push_face(&mut self, indices: &[f64]) -> Result<()> {
        let face: Vec<usize> = indices
            .iter()
            .map(|&v| {
                if v < 0. || v.fract() != 0. || v as usize >= self.vertices.len() {
                    Err(anyhow!("Face index {} out of range", v))
                } else {
                    Ok(v as usize)
                }
            })
            .collect::<Result<_>>()?;
        if face.len() < 3 {
            return Err(anyhow!("Face with < 3 vertices"));
        }
        self.faces.extend(fan_triangulate(&face));
        Ok(())
    }

    fn finish(self) -> Mesh {
        Mesh::new(self.vertices, Some(self.faces))
    }
}

fn read_body_ascii(text: &str, elements: &[PlyElement]) -> Result<Mesh> {
    let mut tokens = text.split_whitespace();
    let mut next_value = |kind: &str| -> Result<f64> {
        tokens
            .next()
            .ok_or_else(|| anyhow!("Unexpected end of PLY ascii data"))?
            .parse::<f64>()
            .with_context(|| format!("Invalid {} value", kind))
    };

    let mut builder = MeshBuilder::default();

    for element in elements {
        for _ in 0..element.count {
            let mut scalars: Vec<f64> = Vec::new();
            let mut list: Option<Vec<f64>> = None;
            for prop in &element.properties {
                match prop {
                    PlyProperty::Scalar { .. } => scalars.push(next_value("scalar")?),
                    PlyProperty::List { .. } => {
                        let count = next_value("list count")? as usize;
                        let mut items: Vec<f64> = Vec::with_capacity(count);
                        for _ in 0..count {
                            items.push(next_value("list item")?);
                        }
                        list = Some(items);
                    }
                }
            }
            store_row(&mut builder, element, &scalars, list.as_deref())?;
        }
    }

    Ok(builder.finish())
}

fn read_body_binary(data: &[u8], elements: &[PlyElement]) -> Result<Mesh> {
    let mut cursor: usize = 0;
    let mut builder = MeshBuilder::default();

    for element in elements {
        for _ in 0..element.count {
            let mut scalars: Vec<f64> = Vec::new();
            let mut list: Option<Vec<f64>> = None;
            for prop in &element.properties {
                match prop {
                    PlyProperty::Scalar { kind, .. } => {
                        scalars.push(kind.read_le(data, &mut cursor)?);
                    }
                    PlyProperty::List {
                        count_kind,
                        item_kind,
                        ..
                    } => {
                        let count = count_kind.read_le(data, &mut cursor)? as usize;
                        let mut items: Vec<f64> = Vec::with_capacity(count);
                        for _ in 0..count {
                            items.push(item_kind.read_le(data, &mut cursor)?);
                        }
                        list = Some(items);
                    }
                }
            }
            store_row(&mut builder, element, &scalars, list.as_deref())?;
        }
    }

    Ok(builder.finish())
}

/// Routes one decoded element row into the mesh builder.
///
/// Only `vertex` and `face` elements contribute; anything else (edges,
/// materials) is decoded for its byte width and dropped.
fn store_row(
    builder: &mut MeshBuilder,
    element: &PlyElement,
    scalars: &[f64],
    list: Option<&[f64]>,
) -> Result<()> {
    match element.name.as_str() {
        "vertex" => builder.push_vertex(element, scalars),
        "face" => {
            let indices =
                list.ok_or_else(|| anyhow!("Face element without a vertex index list"))?;
            builder.push_face(indices)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ASCII_TETRA: &str = "ply\n\
        format ascii 1.0\n\
        comment spider stand-in\n\
        element vertex 4\n\
        property float x\n\
        property float y\n\
        property float z\n\
        element face 4\n\
        property list uchar int vertex_indices\n\
        end_header\n\
        0 0 0\n\
        1 0 0\n\
        0.5 1 0\n\
        0.5 0.5 1\n\
        3 0 1 2\n\
        3 0 1 3\n\
        3 1 2 3\n\
        3 2 0 3\n";

    #[test]
    fn test_read_ascii() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tetra.ply");
        fs::write(&path, ASCII_TETRA)?;

        let mesh = read_ply(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert!(mesh.vertices()[3].is_close(&Point::new(0.5, 0.5, 1.)));
        Ok(())
    }

    #[test]
    fn test_read_ascii_crlf_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tetra_crlf.ply");
        fs::write(&path, ASCII_TETRA.replace('\n', "\r\n"))?;

        let mesh = read_ply(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        Ok(())
    }

    #[test]
    fn test_read_ascii_extra_properties_and_quads() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("quad.ply");
        fs::write(
            &path,
            "ply\n\
             format ascii 1.0\n\
             element vertex 4\n\
             property float x\n\
             property float y\n\
             property float z\n\
             property uchar red\n\
             element face 1\n\
             property list uchar int vertex_indices\n\
             end_header\n\
             0 0 0 255\n\
             1 0 0 255\n\
             1 1 0 255\n\
             0 1 0 255\n\
             4 0 1 2 3\n",
        )?;

        let mesh = read_ply(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        // Quad fans into 2 triangles
        assert_eq!(mesh.face_count(), 2);
        Ok(())
    }

    fn binary_tetra_bytes() -> Vec<u8> {
        let header = "ply\n\
            format binary_little_endian 1.0\n\
            element vertex 4\n\
            property float x\n\
            property float y\n\
            property float z\n\
            element face 4\n\
            property list uchar int vertex_indices\n\
            end_header\n";
        let mut data = header.as_bytes().to_vec();
        let vertices: [[f32; 3]; 4] = [
            [0., 0., 0.],
            [1., 0., 0.],
            [0.5, 1., 0.],
            [0.5, 0.5, 1.],
        ];
        for v in vertices {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        let faces: [[i32; 3]; 4] = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        for f in faces {
            data.push(3u8);
            for i in f {
                data.extend_from_slice(&i.to_le_bytes());
            }
        }
        data
    }

    #[test]
    fn test_read_binary_little_endian() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("tetra.ply");
        fs::write(&path, binary_tetra_bytes())?;

        let mesh = read_ply(&path)?;
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert!(mesh.vertices()[2].is_close(&Point::new(0.5, 1., 0.)));
        Ok(())
    }

    #[test]
    fn test_binary_truncated_errors() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("truncated.ply");
        let mut data = binary_tetra_bytes();
        data.truncate(data.len() - 10);
        fs::write(&path, data)?;

        assert!(read_ply(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_big_endian_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("be.ply");
        fs::write(
            &path,
            "ply\nformat binary_big_endian 1.0\nelement vertex 0\nend_header\n",
        )?;
        assert!(read_ply(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_not_a_ply_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("not.ply");
        fs::write(&path, "solid box\nendsolid box\nend_header\n")?;
        assert!(read_ply(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_face_index_out_of_range() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.ply");
        fs::write(
            &path,
            "ply\n\
             format ascii 1.0\n\
             element vertex 3\n\
             property float x\n\
             property float y\n\
             property float z\n\
             element face 1\n\
             property list uchar int vertex_indices\n\
             end_header\n\
             0 0 0\n\
             1 0 0\n\
             0 1 0\n\
             3 0 1 7\n",
        )?;
        assert!(read_ply(&path).is_err());
        Ok(())
    }
}
