//! Integration tests for document editing and persistence
//!
//! Covers the public editing surface end to end: loading, handle-based
//! edits, timing order and saving through files and format handlers.

use vtt_editor::{
    EditorError, FormatExporter, FormatImporter, FormatOptions, OutputOptions, VttDocument,
    WebVttFormat,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LECTURE: &str = "WEBVTT\n\n\
00:00:01.000 --> 00:00:04.000\n<v Ann>Welcome</v>\n- applause\n\n\
00:00:05.000 --> 00:00:07.000\n<v Ann>Today</v><i>quietly</i>\n\n\
00:00:08.000 --> 00:00:09.000\n<v Ben>Question</v>\n";

    /// Serializing, re-parsing and serializing again is byte-identical
    #[test]
    fn test_serialize_parse_serialize_is_stable() {
        let doc = VttDocument::from_content(LECTURE).unwrap();
        let first = doc.to_vtt_string();
        let second = VttDocument::from_content(&first).unwrap().to_vtt_string();
        assert_eq!(first, second);
    }

    /// A shorter cue sharing a start time goes after the longer one
    #[test]
    fn test_add_cue_after_longer_cue_with_same_start() {
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let handle = doc.add_cue(1_000_000, 2_000_000, "text", "cough").unwrap();

        assert_eq!(doc.keys()[1], handle.key());
        assert_eq!(doc.cues()[0].content_for_tag("v"), ["Welcome"]);
        assert_eq!(doc.cues()[1].text(), ["cough"]);
    }

    /// Handles for one tag span every cue in timing order
    #[test]
    fn test_cue_contents_of_tag_spans_document() {
        let doc = VttDocument::from_content(LECTURE).unwrap();
        let voices: Vec<_> = doc
            .cue_contents_of_tag("v")
            .iter()
            .map(|handle| handle.content().to_string())
            .collect();
        assert_eq!(voices, ["Welcome", "Today", "Question"]);
        assert!(doc.cue_contents_of_tag("u").is_empty());
    }

    /// Renaming and editing through a handle shows up in the output
    #[test]
    fn test_rename_and_edit_through_handle() {
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let mut handle = doc.cue_contents_of_tag("v").remove(1);

        doc.rename_tag(&mut handle, "b").unwrap();
        doc.set_content(&mut handle, "Tomorrow").unwrap();

        assert!(doc.is_modified());
        assert!(doc
            .to_vtt_string()
            .contains("000:00:05.000 --> 000:00:07.000\n<i>quietly</i><b>Tomorrow</b>\n\n"));
    }

    /// Renaming onto an existing tag replaces that bucket
    #[test]
    fn test_rename_onto_existing_tag_overwrites() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let mut handle = doc.cue_contents_of_tag("v").remove(1);
        doc.rename_tag(&mut handle, "i").unwrap();

        let cue = doc.cue(handle.key()).unwrap();
        assert_eq!(cue.content_for_tag("i"), ["Today"]);
        assert!(cue.content_for_tag("v").is_empty());
    }

    /// Handles stay valid after other cues are inserted before them
    #[test]
    fn test_handles_survive_insertions() {
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let mut handle = doc.cue_contents_of_tag("v").remove(2);
        doc.add_cue(0, 500_000, "text", "intro").unwrap();
        doc.add_cue(100_000, 200_000, "text", "beep").unwrap();

        doc.set_content(&mut handle, "Answer").unwrap();
        assert_eq!(doc.cues()[4].content_for_tag("v"), ["Answer"]);
    }

    /// Removed cues reject further edits
    #[test]
    fn test_removed_cue_rejects_edits() {
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let mut handle = doc.cue_contents_of_tag("i").remove(0);
        let removed = doc.remove_cue(handle.key()).unwrap();
        assert_eq!(removed.start_time_us(), 5_000_000);

        let err = doc.rename_tag(&mut handle, "u").unwrap_err();
        assert_eq!(err, EditorError::CueNotFound { key: handle.key() });
        assert_eq!(doc.len(), 2);
    }

    /// Timed windows follow the edited timing after a re-sort
    #[test]
    fn test_windows_follow_timing_edits() {
        let mut doc = VttDocument::from_content(LECTURE).unwrap();
        let handle = doc.cue_contents_of_tag("i").remove(0);
        doc.set_start_time_us(&handle, 8_500_000).unwrap();
        doc.set_end_time_us(&handle, 10_000_000).unwrap();
        doc.sort_cues();

        let mut windows = Vec::new();
        doc.to_cues_with_timing(OutputOptions::all_cues(), |window| {
            windows.push((window.start_time_us, window.end_time_us(), window.cues.len()));
        })
        .unwrap();
        assert_eq!(
            windows,
            [
                (1_000_000, 4_000_000, 1),
                (8_000_000, 8_500_000, 1),
                (8_500_000, 9_000_000, 2),
                (9_000_000, 10_000_000, 1),
            ]
        );
    }

    /// Saving writes canonical text and remembers the path
    #[test]
    fn test_save_and_reload_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lecture.vtt");
        std::fs::write(&path, LECTURE).unwrap();

        let mut doc = VttDocument::from_file(&path).unwrap();
        assert_eq!(doc.file_path(), Some(path.as_path()));

        let mut handle = doc.cue_contents_of_tag("text").remove(0);
        doc.set_content(&mut handle, "cheering").unwrap();
        assert!(doc.is_modified());
        doc.save().unwrap();
        assert!(!doc.is_modified());

        let reloaded = VttDocument::from_file(&path).unwrap();
        assert_eq!(reloaded.cues()[0].text(), ["cheering"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), doc.to_vtt_string());
    }

    /// Save to a new path switches the remembered path
    #[test]
    fn test_save_to_file_updates_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.vtt");

        let mut doc = VttDocument::new();
        doc.add_cue(0, 1_000_000, "text", "fresh").unwrap();
        doc.save_to_file(&path).unwrap();

        assert_eq!(doc.file_path(), Some(path.as_path()));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "WEBVTT\n\n000:00:00.000 --> 000:00:01.000\n- fresh\n\n"
        );
    }

    /// Loading a missing file is an I/O error
    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = VttDocument::from_file(dir.path().join("absent.vtt")).unwrap_err();
        assert!(matches!(err, EditorError::IoError(_)));
        assert!(!err.is_recoverable());
    }

    /// Structural parse errors surface through the editor error
    #[test]
    fn test_bad_header_surfaces_core_error() {
        let err = VttDocument::from_content("NOT VTT\n").unwrap_err();
        assert!(matches!(err, EditorError::Core(_)));
    }

    /// The format handler round-trips through paths
    #[test]
    fn test_format_handler_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.vtt");
        let format = WebVttFormat::new();
        let options = FormatOptions {
            preserve_cue_metadata: true,
            ..FormatOptions::default()
        };

        let (doc, _) = format
            .import_from_string(
                "WEBVTT\n\nq1\n00:00:01.000 --> 00:00:02.000 line:0\n<b>Bold</b>\n",
                &options,
            )
            .unwrap();
        let exported = format.export_to_path(&doc, &path, &options).unwrap();
        assert_eq!(exported.cues_processed, 1);

        let (reloaded, imported) = format.import_from_path(&path, &options).unwrap();
        assert!(imported.warnings.is_empty());
        assert_eq!(reloaded.cues()[0].id(), Some("q1"));
        assert_eq!(reloaded.cues()[0].settings().get("line"), Some("0"));
        assert_eq!(reloaded.cues()[0].content_for_tag("b"), ["Bold"]);
    }
}
