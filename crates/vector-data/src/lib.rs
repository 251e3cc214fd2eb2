// vector-data: Serde structs for animated vector scenes
pub mod model;
pub mod structural;

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_timeline() {
        let data = json!({
            "start": { "secs": 0, "nanos": 0 },
            "duration": { "secs": 1, "nanos": 0 },
            "keyframes": [
                { "fraction": 0.0, "value": 0.0 },
                { "fraction": 1.0, "value": 1.0, "easing": "Accelerate" }
            ]
        });
        let timeline: Timeline<f32> = serde_json::from_value(data).unwrap();
        assert_eq!(timeline.keyframes.len(), 2);
        assert_eq!(timeline.easing, Easing::Linear);
        assert_eq!(timeline.keyframes[0].easing, Easing::Linear);
        assert_eq!(timeline.keyframes[1].easing, Easing::Accelerate);
    }

    #[test]
    fn test_deserialize_path_commands() {
        let data = json!({
            "commands": [
                { "MoveTo": [0.0, 0.0] },
                { "LineTo": [10.0, 0.0] },
                { "CubicTo": [[10.0, 5.0], [5.0, 10.0], [0.0, 10.0]] },
                "Close"
            ]
        });
        let path: PathData = serde_json::from_value(data).unwrap();
        assert_eq!(path.commands.len(), 4);
        assert_eq!(path.commands[3], PathCommand::Close);
    }

    #[test]
    fn test_deserialize_colors() {
        let hex: Color = serde_json::from_value(json!("#80FF0000")).unwrap();
        assert_eq!(hex.r, 1.0);
        assert_eq!(hex.g, 0.0);
        assert!((hex.a - 128.0 / 255.0).abs() < 1e-6);

        let short: Color = serde_json::from_value(json!("#00ff00")).unwrap();
        assert_eq!(short, Color::rgb(0.0, 1.0, 0.0));

        let arr: Color = serde_json::from_value(json!([0.0, 0.0, 1.0])).unwrap();
        assert_eq!(arr, Color::rgb(0.0, 0.0, 1.0));

        assert!(serde_json::from_value::<Color>(json!("#12")).is_err());
        assert!(serde_json::from_value::<Color>(json!("#+12345")).is_err());
        assert_eq!(Color::from_hex("+1234567"), None);
    }
}
