use serde::{Deserialize, Serialize};

/// A timed transcript fragment. Insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Formats segments as an SRT cue list. Each cue is windowed to
/// `[start, end)`; overlapping cues are legal SRT and stack when burned in.
pub fn to_srt(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (index, segment) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            srt_timestamp(segment.start),
            srt_timestamp(segment.end),
            segment.text.trim()
        ));
    }
    out
}

fn srt_timestamp(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let secs = (millis % 60_000) / 1000;
    let remainder = millis % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02},{remainder:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_srt_formatted() {
        assert_eq!(srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(srt_timestamp(1.2), "00:00:01,200");
        assert_eq!(srt_timestamp(59.999), "00:00:59,999");
        assert_eq!(srt_timestamp(3661.5), "01:01:01,500");
    }

    #[test]
    fn negative_start_clamps_to_zero() {
        assert_eq!(srt_timestamp(-0.5), "00:00:00,000");
    }

    #[test]
    fn cue_list_preserves_order_and_windows() {
        let segments = vec![
            Segment::new(0.0, 1.2, "A"),
            Segment::new(1.2, 2.5, "B"),
        ];

        let srt = to_srt(&segments);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,200\nA\n\n\
             2\n00:00:01,200 --> 00:00:02,500\nB\n\n"
        );
    }

    #[test]
    fn cue_text_is_trimmed() {
        let srt = to_srt(&[Segment::new(0.0, 1.0, "  こんにちは ")]);
        assert!(srt.contains("\nこんにちは\n"));
    }

    #[test]
    fn empty_transcript_renders_nothing() {
        assert_eq!(to_srt(&[]), "");
    }
}
