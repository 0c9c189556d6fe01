//! Tests for the intake server
//!
//! - Archive naming properties
//! - Form input through the formatter to the printed lines
//! - The startup font check
//! - HTTP endpoints through axum-test
//! - The full flow from signature pad to archived PDF over a real socket

mod property_tests {
    use proptest::prelude::*;

    use intake_core::{ArchiveName, RocDate};
    use intake_types::CanonicalRecord;

    use crate::storage::ArchiveFolder;

    proptest! {
        /// Whatever the patient typed, both files land directly in the archive folder
        #[test]
        fn archive_files_stay_in_folder(name in any::<String>(), fill_date in "[0-9/]{0,12}") {
            let record = CanonicalRecord { name, fill_date, ..Default::default() };
            let today = RocDate::parse_iso("2024-03-04").unwrap();
            let archive_name = ArchiveName::for_record(&record, today);
            let folder = ArchiveFolder::new("/srv/intake");

            for file in [archive_name.json_file(), archive_name.pdf_file()] {
                let path = folder.dir().join(&file);
                prop_assert_eq!(path.parent(), Some(folder.dir()));
                prop_assert!(file.ends_with("_初診單.json") || file.ends_with("_初診單.pdf"));
            }
        }
    }
}

mod record_flow_tests {
    use intake_core::{build_record, RawForm};
    use intake_render::preview;
    use intake_types::Gender;

    #[test]
    fn test_raw_form_to_printed_lines() {
        let form = RawForm {
            fill_date: "2024-05-20".to_string(),
            name: "王小明".to_string(),
            gender: "male".to_string(),
            birth_year: "80".to_string(),
            birth_month: "5".to_string(),
            birth_day: "15".to_string(),
            id_number: "a123456789".to_string(),
            ..Default::default()
        };

        let record = build_record(form, None).unwrap();
        assert_eq!(record.id_number, "A123456789");
        assert_eq!(record.gender, Some(Gender::Male));

        let lines = preview(&record, "1130601");
        assert!(lines.contains(&"身分證字號：A123456789".to_string()));
        assert!(lines.contains(&"出生日期：民國 80 年 5 月 15 日".to_string()));
        assert!(lines.contains(&"性別：男".to_string()));
        assert_eq!(lines.last().unwrap(), "填表日期：113/05/20");
    }
}

mod startup_tests {
    use intake_render::DocumentRenderer;

    use crate::ensure_cjk_font;

    #[test]
    fn test_embedded_fonts_only_refuses_to_start() {
        let err = ensure_cjk_font(&DocumentRenderer::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--font-dir"));
        assert!(message.contains("INTAKE_FONT_DIRS"));
    }
}

mod http_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use intake_core::RocDate;
    use intake_render::DocumentRenderer;
    use intake_types::SignatureImage;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::storage::ArchiveFolder;
    use crate::{router, AppState};

    fn signature_png() -> Vec<u8> {
        use signature_pad::{ContainerLayout, PadEvent, Point, PointerInput, SignaturePad};

        let mut pad = SignaturePad::new(ContainerLayout::new(240.0, Point::default())).unwrap();
        let _ = pad.handle(&PadEvent::Down(PointerInput::mouse(10.0, 10.0)));
        let _ = pad.handle(&PadEvent::Move(PointerInput::mouse(150.0, 100.0)));
        let _ = pad.handle(&PadEvent::Up);
        pad.export().unwrap().decode().unwrap().bytes
    }

    fn state(root: &TempDir) -> AppState {
        AppState {
            renderer: DocumentRenderer::default(),
            archive: Arc::new(ArchiveFolder::new(root.path())),
            timeout_ms: 60_000,
        }
    }

    fn create_test_server(root: &TempDir) -> TestServer {
        TestServer::new(router(state(root))).unwrap()
    }

    fn submission() -> serde_json::Value {
        json!({
            "medicalRecordNumber": "",
            "fillDate": "113/05/20",
            "name": "王小明",
            "gender": "男",
            "birthYear": "80",
            "birthMonth": "5",
            "birthDay": "15",
            "idNumber": "A123456789",
            "homePhone": "",
            "mobilePhone": "0912345678",
            "address": "台北市信義區",
            "emergencyContact": "王大明",
            "relationship": "父母",
            "emergencyPhone": "0987654321",
            "email": "",
            "referrerName": "",
            "sourceChannels": {"facebook": true, "ig": false, "website": false, "friendRefer": false, "google": false},
            "familyHistory": {"cardiovascular": false, "metabolic": true, "cancer": false, "other": false},
            "familyHistoryOther": "",
            "signature": SignatureImage::from_png(&signature_png()).as_str(),
        })
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        for path in ["/health", "/"] {
            let response = server.get(path).await;
            response.assert_status_ok();

            let json = response.json::<serde_json::Value>();
            assert_eq!(json["status"], "ok");
            assert_eq!(json["service"], "intake-server");
        }
    }

    #[tokio::test]
    async fn test_intake_archives_pdf_and_json() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let response = server.post("/api/intake").json(&submission()).await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "儲存成功");
        assert_eq!(json["fileName"], "1130520_王小明_初診單");

        let folder = root.path().join("電子病歷_初診單");
        let pdf = std::fs::read(folder.join("1130520_王小明_初診單.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let archived = std::fs::read_to_string(folder.join("1130520_王小明_初診單.json")).unwrap();
        assert_eq!(
            archived,
            serde_json::to_string_pretty(&submission()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_root_post_is_an_alias() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let response = server.post("/").json(&submission()).await;
        response.assert_status_ok();
        assert!(root
            .path()
            .join("電子病歷_初診單/1130520_王小明_初診單.pdf")
            .exists());
    }

    #[tokio::test]
    async fn test_plain_text_body_accepted() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let response = server.post("/api/intake").text(submission().to_string()).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_missing_fill_date_uses_today() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let mut body = submission();
        body["fillDate"] = json!("");
        let response = server.post("/api/intake").json(&body).await;
        response.assert_status_ok();

        let expected = format!("{}_王小明_初診單", RocDate::today().unwrap().compact());
        assert_eq!(response.json::<serde_json::Value>()["fileName"], expected);
    }

    #[tokio::test]
    async fn test_broken_signature_still_archived() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let mut body = submission();
        body["signature"] = json!("data:image/png;base64,not really");
        let response = server.post("/api/intake").json(&body).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_invalid_json_rejected() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let response = server.post("/api/intake").text("{not json").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "INVALID_REQUEST");
        assert!(!root.path().join("電子病歷_初診單").exists());
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let response = server
            .post("/api/intake")
            .json(&json!("just a string"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<serde_json::Value>()["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_loose_values_accepted() {
        let root = tempfile::tempdir().unwrap();
        let server = create_test_server(&root);

        let body = json!({"name": "王小明", "gender": "other", "medicalRecordNumber": null});
        let response = server.post("/api/intake").json(&body).await;
        response.assert_status_ok();

        let expected = format!("{}_王小明_初診單", RocDate::today().unwrap().compact());
        assert_eq!(response.json::<serde_json::Value>()["fileName"], expected);

        let folder = root.path().join("電子病歷_初診單");
        assert!(folder.join(format!("{expected}.pdf")).exists());
        let archived: serde_json::Value = serde_json::from_slice(
            &std::fs::read(folder.join(format!("{expected}.json"))).unwrap(),
        )
        .unwrap();
        assert_eq!(archived, body);
    }

    #[tokio::test]
    async fn test_render_timeout() {
        let root = tempfile::tempdir().unwrap();
        let mut state = state(&root);
        state.timeout_ms = 0;
        let server = TestServer::new(router(state)).unwrap();

        let response = server.post("/api/intake").json(&submission()).await;
        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.json::<serde_json::Value>()["code"], "TIMEOUT");
    }

    /// Pad -> record -> HTTP -> archive, over a real socket
    #[tokio::test]
    async fn test_client_dispatch_end_to_end() {
        use intake_core::{prepare_submission, IntakeClient, RawForm};
        use signature_pad::{ContainerLayout, PadEvent, Point, PointerInput, SignaturePad};

        let root = tempfile::tempdir().unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state(&root));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut pad = SignaturePad::new(ContainerLayout::new(400.0, Point::default())).unwrap();
        let _ = pad.handle(&PadEvent::Down(PointerInput::touch(30.0, 40.0)));
        let _ = pad.handle(&PadEvent::Move(PointerInput::touch(200.0, 120.0)));
        let _ = pad.handle(&PadEvent::Leave);

        let form = RawForm {
            fill_date: "2024-05-20".to_string(),
            name: "林志明".to_string(),
            gender: "male".to_string(),
            id_number: "f123456789".to_string(),
            source: vec!["Google".to_string()],
            ..Default::default()
        };
        let record = prepare_submission(form, &pad).unwrap();

        let client = IntakeClient::new(format!("http://{addr}/api/intake"));
        client.dispatch(&record).await.unwrap();

        let folder = root.path().join("電子病歷_初診單");
        let archived: serde_json::Value = serde_json::from_slice(
            &std::fs::read(folder.join("1130520_林志明_初診單.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(archived["idNumber"], "F123456789");
        assert_eq!(archived["sourceChannels"]["google"], true);
        assert!(folder.join("1130520_林志明_初診單.pdf").exists());
    }
}
