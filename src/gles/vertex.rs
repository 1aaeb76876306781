/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Vertex data handed to [super::GL] implementations.

/// One vertex of a fixed-geometry primitive. The position is already in
/// normalized device co-ordinates, so implementations submit it with identity
/// transforms.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

/// Vertex and index arrays for the main triangle batch. These belong to the
/// vertex producer; they are only borrowed for the duration of a draw call.
#[derive(Copy, Clone, Debug)]
pub struct VertexBatch<'a> {
    /// Projected `x, y, z, w`.
    positions: &'a [[f32; 4]],
    /// RGBA bytes, normalized by the GPU.
    colors: &'a [[u8; 4]],
    tex_coords: &'a [[f32; 2]],
    indices: &'a [u16],
}

impl<'a> VertexBatch<'a> {
    /// Bundle the arrays, checking that they are the same length and that
    /// every index refers to a vertex that exists.
    pub fn new(
        positions: &'a [[f32; 4]],
        colors: &'a [[u8; 4]],
        tex_coords: &'a [[f32; 2]],
        indices: &'a [u16],
    ) -> Result<Self, String> {
        if colors.len() != positions.len() || tex_coords.len() != positions.len() {
            return Err(format!(
                "Mismatched vertex arrays: {} positions, {} colors, {} tex coords",
                positions.len(),
                colors.len(),
                tex_coords.len()
            ));
        }
        if let Some(&index) = indices
            .iter()
            .find(|&&index| usize::from(index) >= positions.len())
        {
            return Err(format!(
                "Index {} out of range for {} vertices",
                index,
                positions.len()
            ));
        }
        Ok(VertexBatch {
            positions,
            colors,
            tex_coords,
            indices,
        })
    }

    pub fn positions(&self) -> &'a [[f32; 4]] {
        self.positions
    }
    pub fn colors(&self) -> &'a [[u8; 4]] {
        self.colors
    }
    pub fn tex_coords(&self) -> &'a [[f32; 2]] {
        self.tex_coords
    }
    pub fn indices(&self) -> &'a [u16] {
        self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::VertexBatch;

    #[test]
    fn batch_validation() {
        let positions = [[0.0; 4]; 3];
        let colors = [[255; 4]; 3];
        let tex_coords = [[0.0; 2]; 3];

        let batch = VertexBatch::new(&positions, &colors, &tex_coords, &[0, 1, 2]).unwrap();
        assert_eq!(batch.indices().len(), 3);

        assert!(VertexBatch::new(&positions, &colors[..2], &tex_coords, &[0, 1, 2]).is_err());
        assert!(VertexBatch::new(&positions, &colors, &tex_coords, &[0, 1, 3]).is_err());
        // An empty batch is legal, it just draws nothing.
        assert!(VertexBatch::new(&[], &[], &[], &[]).is_ok());
    }
}
