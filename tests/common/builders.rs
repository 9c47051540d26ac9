//! Test data builders for creating motion records

use serde_json::{json, Map, Value};

/// Builder for motion record contents
pub struct MotionBuilder {
    frames: usize,
    dofs: usize,
    fps: Option<Value>,
    link_body_list: Option<Vec<String>>,
}

impl MotionBuilder {
    pub fn new(frames: usize) -> Self {
        Self {
            frames,
            dofs: 3,
            fps: None,
            link_body_list: None,
        }
    }

    pub fn dofs(mut self, dofs: usize) -> Self {
        self.dofs = dofs;
        self
    }

    pub fn fps(mut self, fps: impl Into<Value>) -> Self {
        self.fps = Some(fps.into());
        self
    }

    pub fn bodies(mut self, names: &[&str]) -> Self {
        self.link_body_list = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Frame `i` has root x = i, rotation z = i (scalar-last), joints all i
    pub fn build(self) -> Value {
        let mut record = Map::new();
        if let Some(fps) = self.fps {
            record.insert("fps".to_string(), fps);
        }
        record.insert(
            "root_pos".to_string(),
            (0..self.frames).map(|i| json!([i as f64, 0.0, 0.8])).collect(),
        );
        record.insert(
            "root_rot".to_string(),
            (0..self.frames).map(|i| json!([0.0, 0.0, i as f64, 1.0])).collect(),
        );
        record.insert(
            "dof_pos".to_string(),
            (0..self.frames)
                .map(|i| Value::from(vec![i as f64; self.dofs]))
                .collect(),
        );
        if let Some(names) = self.link_body_list {
            record.insert("link_body_list".to_string(), Value::from(names));
        }
        Value::Object(record)
    }
}

/// Pickle bytes for a record shaped like the retargeting pipeline's output
///
/// `link_body_list` is a plain list of strings; `root_pos`, `root_rot` and
/// `dof_pos` are numpy arrays (reconstructor REDUCE, then BUILD with a raw
/// byte buffer), which is how real `.pkl` motions store their tracks.
pub fn numpy_motion_pickle(bodies: &[&str]) -> Vec<u8> {
    let mut p = b"\x80\x02}(".to_vec();

    unicode(&mut p, "fps");
    p.extend_from_slice(b"K\x1e");

    for field in ["root_pos", "root_rot", "dof_pos"] {
        unicode(&mut p, field);
        p.extend_from_slice(b"cnumpy.core.multiarray\n_reconstruct\n");
        p.extend_from_slice(b"cnumpy\nndarray\nK\x00\x85C\x01b\x87R");
        p.extend_from_slice(b"(K\x01K\x02K\x03\x86cnumpy\ndtype\nU\x02f8\x89\x88\x87R");
        p.extend_from_slice(b"(K\x03U\x01<NNNJ\xff\xff\xff\xffJ\xff\xff\xff\xffK\x00tb");
        p.extend_from_slice(b"\x89C\x30");
        p.extend_from_slice(&[0u8; 48]);
        p.extend_from_slice(b"tb");
    }

    unicode(&mut p, "link_body_list");
    p.extend_from_slice(b"](");
    for body in bodies {
        unicode(&mut p, body);
    }
    p.extend_from_slice(b"eu.");
    p
}

/// BINUNICODE opcode
fn unicode(p: &mut Vec<u8>, s: &str) {
    p.push(b'X');
    p.extend_from_slice(&(s.len() as u32).to_le_bytes());
    p.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_builder() {
        let record = MotionBuilder::new(2).dofs(4).fps(60).bodies(&["pelvis"]).build();

        assert_eq!(record["fps"], 60);
        assert_eq!(record["root_pos"].as_array().unwrap().len(), 2);
        assert_eq!(record["dof_pos"][1].as_array().unwrap().len(), 4);
        assert_eq!(record["link_body_list"][0], "pelvis");
    }
}
