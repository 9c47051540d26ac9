//! Line-delimited JSON protocol spoken with a viewer process
//!
//! Every request is one JSON object on its own line, tagged by `op`. The
//! viewer answers every request with exactly one reply line:
//!
//! ```text
//! > {"op":"open","robot_type":"unitree_g1","motion_fps":30.0,...}
//! < {"ok":true}
//! > {"op":"step","root_pos":[0.0,0.0,0.8],"root_rot":[1.0,0.0,0.0,0.0],"dof_pos":[...],"follow_camera":true}
//! < {"ok":true}
//! > {"op":"close"}
//! < {"ok":true}
//! ```
//!
//! A reply of `{"ok":false,"error":"..."}` fails the request. The viewer
//! must keep stdout for replies only and log to stderr.

use super::ViewerOptions;
use crate::error::{ReplayError, Result};
use crate::types::{QuatWxyz, Vec3};
use serde::{Deserialize, Serialize};

/// A request sent to the viewer
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewerRequest<'a> {
    /// Load the robot and prepare the renderer
    Open(&'a ViewerOptions),
    /// Show one frame
    Step {
        root_pos: &'a Vec3,
        root_rot: &'a QuatWxyz,
        dof_pos: &'a [f64],
        follow_camera: bool,
    },
    /// Finish, flushing any video
    Close,
}

impl ViewerRequest<'_> {
    /// Short name for logs
    pub fn op(&self) -> &'static str {
        match self {
            ViewerRequest::Open(_) => "open",
            ViewerRequest::Step { .. } => "step",
            ViewerRequest::Close => "close",
        }
    }

    /// Encode as one protocol line, newline included
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// The viewer's answer to one request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewerReply {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ViewerReply {
    /// Parse a reply line
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim())
            .map_err(|e| ReplayError::Viewer(format!("malformed reply {:?}: {}", line.trim(), e)))
    }

    /// Turn a negative reply into an error
    pub fn into_result(self, op: &str) -> Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(ReplayError::Viewer(format!(
                "{} rejected: {}",
                op,
                self.error.as_deref().unwrap_or("no reason given")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RobotType;
    use serde_json::{json, Value};

    #[test]
    fn test_step_line() {
        let root_pos = [0.0, 0.1, 0.8];
        let root_rot = QuatWxyz([1.0, 0.0, 0.0, 0.0]);
        let dof_pos = vec![0.5, -0.5];
        let request = ViewerRequest::Step {
            root_pos: &root_pos,
            root_rot: &root_rot,
            dof_pos: &dof_pos,
            follow_camera: true,
        };

        let line = request.to_line().unwrap();
        assert!(line.ends_with('\n'));
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "op": "step",
                "root_pos": [0.0, 0.1, 0.8],
                "root_rot": [1.0, 0.0, 0.0, 0.0],
                "dof_pos": [0.5, -0.5],
                "follow_camera": true,
            })
        );
    }

    #[test]
    fn test_open_line_flattens_options() {
        let options = ViewerOptions {
            robot_type: RobotType::BoosterT1,
            motion_fps: 50.0,
            record_video: false,
            video_path: None,
            camera_follow: true,
            headless: false,
        };
        let value: Value =
            serde_json::from_str(&ViewerRequest::Open(&options).to_line().unwrap()).unwrap();
        assert_eq!(value["op"], "open");
        assert_eq!(value["robot_type"], "booster_t1");
        assert_eq!(value["video_path"], Value::Null);
    }

    #[test]
    fn test_close_line() {
        assert_eq!(ViewerRequest::Close.to_line().unwrap(), "{\"op\":\"close\"}\n");
    }

    #[test]
    fn test_reply_parsing() {
        assert!(ViewerReply::parse("{\"ok\":true}\n").unwrap().into_result("step").is_ok());

        let err = ViewerReply::parse(r#"{"ok":false,"error":"bad dof count"}"#)
            .unwrap()
            .into_result("step")
            .unwrap_err();
        assert_eq!(err.to_string(), "Viewer error: step rejected: bad dof count");

        assert!(ViewerReply::parse("rendering...").is_err());
    }
}
