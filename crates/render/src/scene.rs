use std::collections::BTreeMap;

use terradrive_common::TileCoord;
use terradrive_stream::{TileDiff, TileStreamer};
use terradrive_terrain::{ResourceId, Tile};

/// Receiver of tile membership changes.
///
/// Implementors register draw nodes on `attach` and drop them on `detach`.
/// They may keep resource ids for lookup but never the resources themselves.
pub trait SceneSink {
    fn attach(&mut self, coord: TileCoord, tile: &Tile);
    fn detach(&mut self, coord: TileCoord);
}

/// Push one streaming diff into a sink: evictions first, then creations.
pub fn apply_diff<S: SceneSink + ?Sized>(sink: &mut S, diff: &TileDiff, streamer: &TileStreamer) {
    for &coord in &diff.evicted {
        sink.detach(coord);
    }
    for &coord in &diff.created {
        match streamer.tile(coord) {
            Some(tile) => sink.attach(coord, tile),
            None => tracing::warn!(%coord, "created tile missing from resident set"),
        }
    }
}

/// What the debug scene keeps per attached tile.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub mesh: ResourceId,
    pub vertices: usize,
    pub triangles: usize,
    pub props: usize,
    pub height_range: (f32, f32),
}

/// In-memory scene that records attached tiles.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<TileCoord, SceneNode>,
    attached_total: u64,
    detached_total: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, coord: TileCoord) -> Option<&SceneNode> {
        self.nodes.get(&coord)
    }

    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn attached_total(&self) -> u64 {
        self.attached_total
    }

    pub fn detached_total(&self) -> u64 {
        self.detached_total
    }

    pub fn prop_count(&self) -> usize {
        self.nodes.values().map(|n| n.props).sum()
    }

    /// Text dump of the scene, one line per tile.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "=== Scene ({} tiles, {} props) ===\n",
            self.nodes.len(),
            self.prop_count()
        );
        for (coord, node) in &self.nodes {
            out.push_str(&format!(
                "  {coord} verts={} tris={} props={} y=[{:.2}, {:.2}]\n",
                node.vertices, node.triangles, node.props, node.height_range.0, node.height_range.1
            ));
        }
        out
    }
}

impl SceneSink for SceneGraph {
    fn attach(&mut self, coord: TileCoord, tile: &Tile) {
        let mesh = tile.mesh();
        let node = SceneNode {
            mesh: tile.resources().terrain_mesh.id(),
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            props: tile.props().len(),
            height_range: mesh.height_range(),
        };
        if self.nodes.insert(coord, node).is_some() {
            tracing::warn!(%coord, "tile attached twice");
        }
        self.attached_total += 1;
    }

    fn detach(&mut self, coord: TileCoord) {
        if self.nodes.remove(&coord).is_none() {
            tracing::warn!(%coord, "detaching unknown tile");
        }
        self.detached_total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::collections::BTreeSet;
    use terradrive_common::TerrainConfig;
    use terradrive_noise::NoiseField;
    use terradrive_terrain::{ResourcePool, TileFactory};

    fn setup() -> (TileStreamer, TileFactory, NoiseField) {
        let config = TerrainConfig::default();
        (
            TileStreamer::new(&config).unwrap(),
            TileFactory::new(config, ResourcePool::new()).unwrap(),
            NoiseField::new(1),
        )
    }

    #[test]
    fn scene_mirrors_resident_set() {
        let (mut streamer, factory, noise) = setup();
        let mut scene = SceneGraph::new();

        for x in [0.0, 41.0, 85.0, -300.0] {
            let diff = streamer.update(Vec2::new(x, 12.0), &factory, &noise);
            apply_diff(&mut scene, &diff, &streamer);
            let drawn: BTreeSet<_> = scene.coords().collect();
            let resident: BTreeSet<_> = streamer.resident_coords().collect();
            assert_eq!(drawn, resident);
        }
        assert_eq!(
            scene.attached_total() - scene.detached_total(),
            scene.len() as u64
        );
    }

    #[test]
    fn nodes_describe_tiles() {
        let (mut streamer, factory, noise) = setup();
        let mut scene = SceneGraph::new();
        let diff = streamer.update(Vec2::ZERO, &factory, &noise);
        apply_diff(&mut scene, &diff, &streamer);

        let coord = TileCoord::new(0, 0);
        let node = scene.node(coord).unwrap();
        let tile = streamer.tile(coord).unwrap();
        assert_eq!(node.vertices, 33 * 33);
        assert_eq!(node.triangles, 2048);
        assert_eq!(node.props, tile.props().len());
        assert_eq!(node.mesh, tile.resources().terrain_mesh.id());
        assert!(node.height_range.0 <= node.height_range.1);
    }

    #[test]
    fn describe_lists_every_tile() {
        let (mut streamer, factory, noise) = setup();
        let mut scene = SceneGraph::new();
        let diff = streamer.update(Vec2::ZERO, &factory, &noise);
        apply_diff(&mut scene, &diff, &streamer);

        let text = scene.describe();
        assert!(text.starts_with("=== Scene (25 tiles"));
        assert!(text.contains("(-2, -2) verts=1089"));
        assert_eq!(text.lines().count(), 26);
    }

    #[test]
    fn noop_diff_leaves_scene_untouched() {
        let (mut streamer, factory, noise) = setup();
        let mut scene = SceneGraph::new();
        let diff = streamer.update(Vec2::ZERO, &factory, &noise);
        apply_diff(&mut scene, &diff, &streamer);
        let attached = scene.attached_total();

        let diff = streamer.update(Vec2::new(1.0, 1.0), &factory, &noise);
        apply_diff(&mut scene, &diff, &streamer);
        assert_eq!(scene.attached_total(), attached);
        assert_eq!(scene.detached_total(), 0);
    }
}
