// Tests for endpoint and AJAX extraction
// Canonical framework calls, ignore rules, ordering and deduplication

use codescope::detectors::endpoint::{extract_from_source, EndpointDetector, ANY_METHOD};
use codescope::detectors::Detector;
use codescope::patterns::endpoints::ENDPOINT_PATTERNS;
use std::fs;
use tempfile::tempdir;

/// (source, framework, method, route) for route declarations in JavaScript
/// and TypeScript, which share one pattern list.
const SCRIPT_CASES: &[(&str, &str, &str, &str)] = &[
    ("app.get(\"/users\", list);", "Express", "GET", "/users"),
    ("router.route(\"/books\").get(list)", "Express", ANY_METHOD, "/books"),
    ("@Get('profile')\ngetProfile() {}", "NestJS", "GET", "profile"),
    ("$.ajax({ url: \"/api/save\", type: \"POST\" })", "jQuery AJAX", ANY_METHOD, "/api/save"),
    ("$.post('/api/items', data)", "jQuery AJAX", "POST", "/api/items"),
    ("axios.put(\"/api/users/1\", body)", "Axios", "PUT", "/api/users/1"),
    ("fetch(\"/api/items\")", "Fetch API", ANY_METHOD, "/api/items"),
    ("xhr.open(\"GET\", \"/api/data\")", "XMLHttpRequest", "GET", "/api/data"),
    ("$http.get('/api/list')", "AngularJS", "GET", "/api/list"),
    ("this.http.delete('/api/x/1')", "Angular HttpClient", "DELETE", "/api/x/1"),
];

/// (language, source, framework, method, route) for every other language.
const SERVER_CASES: &[(&str, &str, &str, &str, &str)] = &[
    ("Java", "@GetMapping(\"/users\")\npublic List<User> all() {}", "Spring MVC", "GET", "/users"),
    ("Java", "@Path(\"/orders\")\npublic class Orders {}", "JAX-RS", ANY_METHOD, "/orders"),
    ("Java", "@Route(path = \"dashboard\")\npublic class Dashboard {}", "Vaadin", ANY_METHOD, "dashboard"),
    ("C#", "[HttpDelete(\"users/{id}\")]", "ASP.NET Core", "DELETE", "users/{id}"),
    ("C#", "app.MapGet(\"/todos\", () => todos);", "ASP.NET Core Minimal", "GET", "/todos"),
    ("C#", "[Route(\"api/[controller]\")]", "ASP.NET Route", ANY_METHOD, "api/[controller]"),
    ("Rust", "#[get(\"/health\")]\nasync fn health() {}", "Rust HTTP", "GET", "/health"),
    ("Kotlin", "routing {\n    get(\"/hello\") {\n    }\n}", "Ktor routing", ANY_METHOD, "/hello"),
    ("Python", "@app.route(\"/items\")\ndef items(): pass", "Flask/FastAPI", ANY_METHOD, "/items"),
    ("Python", "@router.post(\"/items\")\nasync def create(): pass", "Flask/FastAPI", "POST", "/items"),
    ("Python", "path(\"articles/\", views.index)", "Django path", ANY_METHOD, "articles/"),
    ("Python", "re_path(r\"^archive/$\", views.archive)", "Django url", ANY_METHOD, "^archive/$"),
    ("Ruby", "get 'photos', to: 'photos#index'", "Rails", "GET", "photos"),
    ("Ruby", "resources :photos", "Rails resources", ANY_METHOD, "photos"),
    ("Ruby", "post '/login' do\nend", "Sinatra", "POST", "/login"),
    ("PHP", "Route::get('/users', [UserController::class, 'index']);", "Laravel", "GET", "/users"),
    ("PHP", "Route::prefix('admin')->group(function () {});", "Laravel group", ANY_METHOD, "admin"),
    ("PHP", "Route::resource('photos', PhotoController::class);", "Laravel resource", ANY_METHOD, "photos"),
    ("PHP", "#[Route('/blog', name: 'blog_list')]", "Symfony", ANY_METHOD, "/blog"),
    ("Go", "r.GET(\"/ping\", handler)", "Gin", "GET", "/ping"),
    ("Go", "http.HandleFunc(\"/x\", h)", "net/http", ANY_METHOD, "/x"),
    ("Go", "router.HandleFunc(\"/articles\", ArticlesHandler)", "Gorilla Mux", ANY_METHOD, "/articles"),
];

/// Route declarations for `language` as (source, framework, method, route).
fn cases_for(language: &str) -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    match language {
        "JavaScript" | "TypeScript" => SCRIPT_CASES.to_vec(),
        _ => SERVER_CASES
            .iter()
            .filter(|case| case.0 == language)
            .map(|&(_, source, framework, method, route)| (source, framework, method, route))
            .collect(),
    }
}

fn single(language: &str, source: &str) -> (String, String, String) {
    let (endpoints, _) = extract_from_source("fixture", language, source);
    assert_eq!(
        endpoints.len(),
        1,
        "expected exactly one {} endpoint in {:?}: {:?}",
        language,
        source,
        endpoints
    );
    let e = &endpoints[0];
    (e.framework.clone(), e.method.clone(), e.route.clone())
}

#[test]
fn test_canonical_calls_yield_one_record() {
    for language in ENDPOINT_PATTERNS.keys() {
        for (source, framework, method, route) in cases_for(language) {
            let (f, m, r) = single(language, source);
            assert_eq!(f, framework, "{} framework for {:?}", language, source);
            assert_eq!(m, method, "{} method for {:?}", language, source);
            assert_eq!(r, route, "{} route for {:?}", language, source);
        }
    }
}

#[test]
fn test_every_registered_pattern_has_a_fixture() {
    for (language, patterns) in ENDPOINT_PATTERNS.iter() {
        let cases = cases_for(language);
        assert!(!cases.is_empty(), "no fixtures for {}", language);
        for pattern in patterns {
            assert!(
                cases.iter().any(|case| pattern.regex.is_match(case.0)),
                "{} pattern {} ({}) has no fixture",
                language,
                pattern.framework,
                pattern.regex.as_str()
            );
        }
    }
}

#[test]
fn test_ktor_reports_first_get_of_routing_block() {
    let source = "routing {\n    get(\"/a\") { }\n    post(\"/b\") { }\n}\n";
    let (endpoints, _) = extract_from_source("Application.kt", "Kotlin", source);

    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].line, 1);
    assert_eq!(endpoints[0].route, "/a");
    assert_eq!(endpoints[0].method, ANY_METHOD);
}

#[test]
fn test_one_line_may_match_several_patterns() {
    let source = "$.get('/api/users'); fetch('/api/items');";
    let (endpoints, ajax) = extract_from_source("client.js", "JavaScript", source);

    let frameworks: Vec<&str> = endpoints.iter().map(|e| e.framework.as_str()).collect();
    assert!(frameworks.contains(&"jQuery AJAX"));
    assert!(frameworks.contains(&"Fetch API"));

    let urls: Vec<&str> = ajax.iter().map(|a| a.url.as_str()).collect();
    assert!(urls.contains(&"/api/users"));
    assert!(urls.contains(&"/api/items"));
    assert!(ajax.iter().all(|a| a.line == 1));
}

#[test]
fn test_ajax_call_styles() {
    let source = r#"
axios.post("/api/orders", body);
axios({ method: 'get', url: '/api/config' });
$.ajax({ type: "POST", url: "/api/save" });
$http.delete('/api/session');
this.http.get<User[]>('/api/users');
var xhr = new XMLHttpRequest();
"#;
    let (_, ajax) = extract_from_source("client.ts", "TypeScript", source);
    let urls: Vec<(&str, usize)> = ajax.iter().map(|a| (a.url.as_str(), a.line)).collect();

    assert!(urls.contains(&("/api/orders", 2)));
    assert!(urls.contains(&("/api/config", 3)));
    assert!(urls.contains(&("/api/save", 4)));
    assert!(urls.contains(&("/api/session", 5)));
    assert!(urls.contains(&("/api/users", 6)));
    assert!(ajax.iter().all(|a| a.line != 7), "bare constructor has no URL");
}

#[test]
fn test_results_are_ordered_by_file_then_line() {
    let dir = tempdir().unwrap();
    let mut a = "\n".repeat(9);
    a.push_str("@app.route(\"/a\")\n");
    fs::write(dir.path().join("a.py"), a).unwrap();
    fs::write(dir.path().join("b.py"), "\n@app.route(\"/b\")\n").unwrap();

    let scan = EndpointDetector::new(dir.path(), ["Python"], 1 << 20).scan();

    assert_eq!(scan.endpoints.len(), 2);
    assert_eq!(scan.endpoints[0].file, "a.py");
    assert_eq!(scan.endpoints[0].line, 10);
    assert_eq!(scan.endpoints[1].file, "b.py");
    assert_eq!(scan.endpoints[1].line, 2);
}

#[test]
fn test_ignored_paths_contribute_nothing() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/__tests__")).unwrap();
    fs::create_dir_all(dir.path().join("node_modules/lib")).unwrap();
    let routes = "router.get(\"/users\", h);\nfetch('/api/x');\n";
    fs::write(dir.path().join("src/__tests__/routes.js"), routes).unwrap();
    fs::write(dir.path().join("node_modules/lib/index.js"), routes).unwrap();
    fs::write(dir.path().join("src/users.test.js"), routes).unwrap();

    let mut detector = EndpointDetector::new(dir.path(), ["JavaScript"], 1 << 20);
    let result = detector.detect().unwrap();

    assert!(!result.found());
    assert_eq!(detector.confidence(), 0.0);
}

#[test]
fn test_inactive_language_is_not_scanned() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "r.GET(\"/ping\", h)\n").unwrap();
    fs::write(dir.path().join("app.py"), "@app.get(\"/items\")\n").unwrap();

    let scan = EndpointDetector::new(dir.path(), ["Python"], 1 << 20).scan();

    assert_eq!(scan.endpoints.len(), 1);
    assert_eq!(scan.endpoints[0].file, "app.py");
    assert_eq!(scan.endpoints[0].method, "GET");
}

#[test]
fn test_undecodable_file_is_skipped() {
    let dir = tempdir().unwrap();
    let mut bytes = b"app.get(\"/users\", h);\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    fs::write(dir.path().join("broken.js"), bytes).unwrap();
    fs::write(dir.path().join("ok.js"), "app.put(\"/users/1\", h);\n").unwrap();

    let scan = EndpointDetector::new(dir.path(), ["JavaScript"], 1 << 20).scan();

    assert_eq!(scan.endpoints.len(), 1);
    assert_eq!(scan.endpoints[0].file, "ok.js");
    assert_eq!(scan.endpoints[0].method, "PUT");
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_not_double_counted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("routes.js"), "router.delete(\"/items/:id\", h);\n").unwrap();
    std::os::unix::fs::symlink(dir.path().join("routes.js"), dir.path().join("alias.js")).unwrap();

    let scan = EndpointDetector::new(dir.path(), ["JavaScript"], 1 << 20).scan();

    assert_eq!(scan.endpoints.len(), 1);
    assert_eq!(scan.endpoints[0].route, "/items/:id");
}

#[test]
fn test_detector_is_reusable() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("server.js"), "app.all(\"/*\", h);\n").unwrap();

    let mut detector = EndpointDetector::new(dir.path(), ["JavaScript"], 1 << 20);
    let first = detector.detect().unwrap();
    let second = detector.detect().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.matches.len(), 1);
    assert_eq!(first.matches[0].payload.as_deref(), Some("ALL /*"));
    assert_eq!(detector.confidence(), 1.0);
}
