#![allow(dead_code)]

use camino::Utf8PathBuf;
use gadget_ic::{Body, Header};
use nom::{
    bytes::complete::take,
    number::complete::{le_f32, le_u32},
    IResult,
};
use tempfile::TempDir;

/// A block as read back from a snapshot file.
#[derive(Debug)]
pub struct RawBlock<'a> {
    pub head: u32,
    pub payload: &'a [u8],
    pub tail: u32,
}

impl RawBlock<'_> {
    pub fn f32_values(&self) -> Vec<f32> {
        self.payload
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    pub fn u32_values(&self) -> Vec<u32> {
        self.payload
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }
}

pub fn parse_block(input: &[u8]) -> IResult<&[u8], RawBlock<'_>> {
    let (input, head) = le_u32(input)?;
    let (input, payload) = take(head as usize)(input)?;
    let (input, tail) = le_u32(input)?;
    Ok((
        input,
        RawBlock {
            head,
            payload,
            tail,
        },
    ))
}

/// Split a whole snapshot file into its blocks, header block first.
pub fn parse_snapshot(mut input: &[u8]) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    while !input.is_empty() {
        let (rest, block) = parse_block(input).expect("truncated block");
        blocks.push(block);
        input = rest;
    }
    blocks
}

pub fn first_f32(input: &[u8]) -> f32 {
    let (_, value) = le_f32::<_, nom::error::Error<&[u8]>>(input).unwrap();
    value
}

/// Temporary directory and a path inside it that does not exist yet.
pub fn scratch_file(name: &str) -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path");
    (dir, path)
}

/// The 1 gas + 2 halo particles configuration.
pub fn three_particles() -> (Header, Body) {
    let npart = [1, 2, 0, 0, 0, 0];
    let header = Header::new(npart);
    let mut body = Body::new(npart).unwrap();
    body.pos[1] = nalgebra::Vector3::new(1.0, 1.0, 1.0);
    body.pos[2] = nalgebra::Vector3::new(-1.0, 0.0, 1.0);
    body.id = vec![0, 1, 2];
    body.mass = vec![1.0; 3];
    (header, body)
}
