use pretty_assertions::assert_eq;
use ppstack::capture::StaticDump;
use ppstack::commands::Printer;
use ppstack::render::{ansi::RESET_FG, default_palette, Palette, PathFormat};
use ppstack::snapshot::{
    Arg, Bucket, Call, Func, Goroutine, JsonEngine, Scanned, Signature, Similarity, Snapshot,
    SnapshotEngine, Stack,
};
use ppstack::utils::error::{RenderError, ScanError};
use std::io::{self, Write};
use tempfile::NamedTempFile;

fn call(dir: &str, func: &str, path: &str, line: u32) -> Call {
    Call {
        func: Func {
            name: func.to_string(),
            dir_name: dir.to_string(),
            exported: func.starts_with(char::is_uppercase),
            pkg_main: dir == "main",
        },
        line,
        remote_src_path: path.to_string(),
        ..Default::default()
    }
}

fn goroutine(id: u64, state: &str, calls: Vec<Call>) -> Goroutine {
    Goroutine {
        id,
        signature: Signature {
            state: state.to_string(),
            stack: Stack {
                calls,
                elided: false,
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

fn dump(snapshot: &Snapshot) -> StaticDump {
    StaticDump::new(serde_json::to_vec(snapshot).unwrap())
}

fn render(snapshot: &Snapshot, palette: &Palette, pf: PathFormat) -> String {
    let source = dump(snapshot);
    let engine = JsonEngine::new();
    let mut out = Vec::new();
    Printer::new(&source, &engine)
        .with_palette(palette)
        .with_path_format(pf)
        .render(&mut out, true)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_single_main_goroutine() {
    let mut g = goroutine(1, "running", vec![call("main", "main", "/app/main.go", 5)]);
    g.first = true;
    let snapshot = Snapshot {
        goroutines: vec![g],
        race: false,
    };

    let out = render(&snapshot, default_palette(), PathFormat::Relative);
    let palette = default_palette();

    // Only one entry: no highlight even though it is flagged first
    assert!(out.starts_with(&format!("1: running{}\n", RESET_FG)));
    assert!(!out.contains(&palette.routine_first));
    assert!(out.contains(&format!("{}main{}()", palette.func_main, palette.arguments)));
    assert!(out.ends_with(&format!("{}\n", RESET_FG)));
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_identical_goroutines_share_a_bucket() {
    let calls = vec![
        call("sync", "runtime_Semacquire", "/go/src/sync/sema.go", 56),
        call("worker", "(*Pool).wait", "/app/worker/pool.go", 88),
    ];
    let snapshot = Snapshot {
        goroutines: vec![
            goroutine(3, "semacquire", calls.clone()),
            goroutine(4, "semacquire", calls),
        ],
        race: false,
    };

    let out = render(&snapshot, &Palette::plain(), PathFormat::Base);

    assert_eq!(
        out,
        "2: semacquire\n\
         \x20   sync   sema.go:56 runtime_Semacquire()\n\
         \x20   worker pool.go:88 (*Pool).wait()\n"
    );
}

#[test]
fn test_similarity_controls_bucketing() {
    let with_ptr = |id: u64, value: u64| {
        let mut g = goroutine(id, "chan send", vec![call("queue", "push", "/app/queue/q.go", 17)]);
        g.signature.stack.calls[0].args.values = vec![Arg {
            value,
            is_ptr: true,
            name: String::new(),
        }];
        g
    };
    let snapshot = Snapshot {
        goroutines: vec![with_ptr(1, 0xc000010000), with_ptr(2, 0xc000090000)],
        race: false,
    };
    let source = dump(&snapshot);
    let engine = JsonEngine::new();
    let plain = Palette::plain();
    let printer = Printer::new(&source, &engine)
        .with_palette(&plain)
        .with_path_format(PathFormat::Base);

    let mut out = Vec::new();
    printer.render(&mut out, true).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "2: chan send\n    queue q.go:17 push(*)\n"
    );

    let mut out = Vec::new();
    printer
        .with_similarity(Similarity::ExactLines)
        .render(&mut out, true)
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches(": chan send").count(), 2);
    assert!(out.contains("push(0xc000010000)"));
}

#[test]
fn test_race_lists_every_goroutine() {
    let mut writer = goroutine(1, "running", vec![call("cache", "Store", "/app/cache/cache.go", 30)]);
    writer.first = true;
    writer.race_addr = 0xdeadbeef;
    writer.race_write = true;
    let reader = goroutine(2, "runnable", vec![call("cache", "Load", "/app/cache/cache.go", 21)]);
    let snapshot = Snapshot {
        goroutines: vec![writer, reader],
        race: true,
    };

    let out = render(&snapshot, &Palette::plain(), PathFormat::Base);

    assert_eq!(
        out,
        "1: running Race write @ 0xdeadbeef\n\
         \x20   cache cache.go:30 Store()\n\
         2: runnable\n\
         \x20   cache cache.go:21 Load()\n"
    );
}

#[test]
fn test_race_headers_highlight_first_with_default_palette() {
    let mut a = goroutine(1, "running", vec![call("cache", "Store", "/app/cache.go", 30)]);
    a.first = true;
    a.race_addr = 0x10;
    let b = goroutine(2, "running", vec![call("cache", "Load", "/app/cache.go", 21)]);
    let snapshot = Snapshot {
        goroutines: vec![a, b],
        race: true,
    };

    let palette = default_palette();
    let out = render(&snapshot, palette, PathFormat::Base);
    let headers: Vec<&str> = out.lines().filter(|l| !l.starts_with("    ")).collect();

    assert_eq!(headers.len(), 2);
    assert!(headers[0].starts_with(&palette.routine_first));
    assert!(headers[0].contains(" Race read @ 0x00000010"));
    assert!(!headers[1].contains("Race"));
}

#[test]
fn test_elided_stack_ends_with_marker() {
    let mut g = goroutine(9, "IO wait", vec![call("net", "(*conn).Read", "/go/src/net/net.go", 183)]);
    g.signature.stack.elided = true;
    let snapshot = Snapshot {
        goroutines: vec![g],
        race: false,
    };

    let out = render(&snapshot, default_palette(), PathFormat::Full);

    assert!(out.ends_with("\n    (...)\n"));
    assert_eq!(out.lines().last(), Some("    (...)"));
}

#[test]
fn test_printer_frames_are_hidden() {
    let mut g = goroutine(
        1,
        "running",
        vec![
            call("ppstack", "getStack", "/mod/ppstack/ppstack.go", 250),
            call("ppstack", "Print", "/mod/ppstack/ppstack.go", 258),
            call("main", "main", "/app/main.go", 12),
        ],
    );
    g.current = true;
    let snapshot = Snapshot {
        goroutines: vec![g],
        race: false,
    };

    let out = render(&snapshot, &Palette::plain(), PathFormat::Base);

    assert_eq!(out, "1: running\n    main main.go:12 main()\n");
}

#[test]
fn test_current_only_dump() {
    let everyone = Snapshot {
        goroutines: vec![
            goroutine(1, "running", vec![call("main", "main", "/app/main.go", 12)]),
            goroutine(2, "sleep", vec![call("time", "Sleep", "/go/src/time/sleep.go", 9)]),
        ],
        race: false,
    };
    let me = Snapshot {
        goroutines: vec![goroutine(1, "running", vec![call("main", "main", "/app/main.go", 12)])],
        race: false,
    };
    let source = StaticDump::new(serde_json::to_vec(&everyone).unwrap())
        .with_current(serde_json::to_vec(&me).unwrap());
    let engine = JsonEngine::new();
    let plain = Palette::plain();
    let printer = Printer::new(&source, &engine).with_palette(&plain);

    let mut out = Vec::new();
    printer.render(&mut out, false).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);

    let mut out = Vec::new();
    printer.render(&mut out, true).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
}

#[test]
fn test_current_only_dump_from_files() {
    let everyone = Snapshot {
        goroutines: vec![
            goroutine(1, "chan receive", vec![call("worker", "wait", "/app/worker/w.go", 3)]),
            goroutine(2, "sleep", vec![call("time", "Sleep", "/go/src/time/sleep.go", 9)]),
        ],
        race: false,
    };
    let me = Snapshot {
        goroutines: vec![everyone.goroutines[0].clone()],
        race: false,
    };
    let mut all_file = NamedTempFile::new().unwrap();
    all_file.write_all(&serde_json::to_vec(&everyone).unwrap()).unwrap();
    let mut current_file = NamedTempFile::new().unwrap();
    current_file.write_all(&serde_json::to_vec(&me).unwrap()).unwrap();

    let source = StaticDump::from_file(all_file.path())
        .unwrap()
        .with_current_file(current_file.path())
        .unwrap();
    let engine = JsonEngine::new();
    let plain = Palette::plain();
    let printer = Printer::new(&source, &engine)
        .with_palette(&plain)
        .with_path_format(PathFormat::Base);

    let mut out = Vec::new();
    printer.render(&mut out, false).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1: chan receive\n    worker w.go:3 wait()\n"
    );
}

#[test]
fn test_large_dump_is_captured_whole() {
    let goroutines = (1..=200)
        .map(|id| {
            goroutine(
                id,
                "chan receive",
                vec![call("worker", "loop", &format!("/app/worker/w{}.go", id), 7)],
            )
        })
        .collect();
    let snapshot = Snapshot {
        goroutines,
        race: false,
    };

    let out = render(&snapshot, &Palette::plain(), PathFormat::Base);
    assert!(out.contains("w200.go:7"));
    assert_eq!(out.lines().count(), 400);
}

#[test]
fn test_invalid_document_is_an_error() {
    let source = StaticDump::new("goroutine 1 [running]:\nmain.main()");
    let engine = JsonEngine::new();
    let mut out = Vec::new();

    let result = Printer::new(&source, &engine).render(&mut out, true);

    assert!(matches!(result, Err(RenderError::Scan(ScanError::Json(_)))));
    assert!(out.is_empty());
}

#[test]
fn test_empty_dump_yields_no_snapshot() {
    let source = StaticDump::new("");
    let engine = JsonEngine::new();
    let mut out = Vec::new();

    let result = Printer::new(&source, &engine).render(&mut out, true);

    assert!(matches!(result, Err(RenderError::NoSnapshot)));
    assert!(out.is_empty());
}

/// Engine that returns a canned snapshot together with end of input
struct EofEngine;

impl SnapshotEngine for EofEngine {
    fn scan(&self, _raw: &[u8], _diagnostics: &mut dyn Write) -> Scanned {
        Scanned {
            snapshot: Some(Snapshot {
                goroutines: vec![goroutine(5, "select", vec![call("main", "main", "/a/main.go", 3)])],
                race: false,
            }),
            error: Some(ScanError::EndOfInput),
        }
    }

    fn aggregate(&self, snapshot: &Snapshot, _similarity: Similarity) -> Vec<Bucket> {
        snapshot
            .goroutines
            .iter()
            .map(|g| Bucket {
                ids: vec![g.id],
                first: g.first,
                signature: g.signature.clone(),
            })
            .collect()
    }
}

#[test]
fn test_end_of_input_is_not_an_error() {
    let source = StaticDump::new("anything");
    let plain = Palette::plain();
    let mut out = Vec::new();

    Printer::new(&source, &EofEngine)
        .with_palette(&plain)
        .with_path_format(PathFormat::Base)
        .render(&mut out, true)
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "1: select\n    main main.go:3 main()\n");
}

/// Engine that fails with an I/O error
struct BrokenEngine;

impl SnapshotEngine for BrokenEngine {
    fn scan(&self, _raw: &[u8], _diagnostics: &mut dyn Write) -> Scanned {
        Scanned::failed(ScanError::Io(io::Error::new(io::ErrorKind::Other, "boom")))
    }

    fn aggregate(&self, _snapshot: &Snapshot, _similarity: Similarity) -> Vec<Bucket> {
        Vec::new()
    }
}

#[test]
fn test_engine_error_is_surfaced() {
    let source = StaticDump::new("anything");
    let mut out = Vec::new();

    let result = Printer::new(&source, &BrokenEngine).render(&mut out, true);

    let err = result.unwrap_err();
    assert!(matches!(err, RenderError::Scan(ScanError::Io(_))));
    assert!(err.to_string().contains("boom"));
}

/// Sink that rejects every write
struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_errors_are_ignored() {
    let snapshot = Snapshot {
        goroutines: vec![goroutine(1, "running", vec![call("main", "main", "/app/main.go", 1)])],
        race: false,
    };
    let source = dump(&snapshot);
    let engine = JsonEngine::new();

    let result = Printer::new(&source, &engine).render(&mut ClosedSink, true);
    assert!(result.is_ok());
}
