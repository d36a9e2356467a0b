//! On-disk meshlet mesh format.
//!
//! A mesh file is a fixed-size [`MeshFileHeader`](meshlet::format::MeshFileHeader) followed by a submesh table, a
//! meshlet table, a vertex blob and a meshlet triangle blob, all addressed by byte offsets from the start of the file.
//! The tables are laid out exactly like their GPU counterparts so they can be uploaded verbatim.

pub mod meshlet;
pub mod shape;
