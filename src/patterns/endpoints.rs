use regex::Regex;
use std::collections::HashMap;

/// A route-declaration regex and the framework it belongs to.
///
/// Every regex names its route capture `route`; patterns that can tell the
/// HTTP verb also capture `method`.
pub struct EndpointPattern {
    pub regex: Regex,
    pub framework: &'static str,
}

/// One client-side call idiom. The called URL is the `url` capture; idioms
/// without a URL argument (bare constructors) have no such group.
pub struct AjaxPattern {
    pub style: &'static str,
    pub regex: Regex,
}

fn endpoint(framework: &'static str, pattern: &str) -> EndpointPattern {
    EndpointPattern {
        regex: Regex::new(pattern).unwrap(),
        framework,
    }
}

/// Patterns shared by JavaScript and TypeScript sources.
fn script_patterns() -> Vec<EndpointPattern> {
    vec![
        endpoint(
            "Express",
            r#"\b(?:app|router)\.(?P<method>get|post|put|delete|patch|all)\s*\(\s*["'](?P<route>[^"']+)["']"#,
        ),
        // router.route("/x").get(...).post(...)
        endpoint(
            "Express",
            r#"router\.route\s*\(\s*["'](?P<route>[^"']+)["']\)\s*\.\s*(?:get|post|put|delete|patch)\s*\("#,
        ),
        endpoint(
            "NestJS",
            r#"@(?:Controller|(?P<method>Get|Post|Put|Delete|Patch))\(\s*["'](?P<route>[^"']*)["']\s*\)"#,
        ),
        endpoint(
            "jQuery AJAX",
            r#"(?:\$|\bjQuery)\.ajax\s*\(\s*\{[^}]*url\s*:\s*["'](?P<route>[^"']+)["']"#,
        ),
        endpoint(
            "jQuery AJAX",
            r#"\$(?:\s*\.\s*)?(?:(?P<method>get|post)|ajax)\s*\(\s*["'](?P<route>[^"']+)["']"#,
        ),
        endpoint(
            "Axios",
            r#"\baxios\.(?P<method>get|post|put|delete|patch)\s*\(\s*["'](?P<route>[^"']+)["']"#,
        ),
        endpoint("Fetch API", r#"\bfetch\s*\(\s*["'](?P<route>[^"']+)["']"#),
        endpoint(
            "XMLHttpRequest",
            r#"\bxhr\.open\(\s*["'](?P<method>GET|POST|PUT|DELETE|PATCH)["']\s*,\s*["'](?P<route>[^"']+)["']"#,
        ),
        endpoint(
            "AngularJS",
            r#"\$http\.(?P<method>get|post|put|delete|patch)\s*\(\s*['"](?P<route>[^'"]+)['"]"#,
        ),
        endpoint(
            "Angular HttpClient",
            r#"\bthis\.http\.(?P<method>get|post|put|delete|patch)(?:<[^>(]*>)?\s*\(\s*['"](?P<route>[^'"]+)['"]"#,
        ),
    ]
}

lazy_static::lazy_static! {
    /// Paths (root-relative, `/`-separated) excluded from endpoint scanning.
    /// A path is skipped if any pattern matches.
    pub static ref ENDPOINT_IGNORE_PATTERNS: Vec<Regex> = [
        // test and mock code
        r"(?i)(?:^|/)__tests__(?:/|$)",
        r"(?i)(?:^|/)__mocks__(?:/|$)",
        r"(?i)\btest(s|ing)?\b",
        r"(?i)(?:^|/)specs?(?:/|$)",
        r"(?i)\.test\.(js|ts)x?$",
        r"(?i)\.(spec|e2e)\.(js|ts)x?$",
        r"(?i)_test\.go$",
        r"(?i)Tests?\.cs$",
        r"(?i)Test\.java$",
        r"(?i)_spec\.rb$",
        r"(?i)(?:^|/)test_[^/]*\.py$",
        // dependencies and build output
        r"\bnode_modules\b",
        r"\bvendor\b",
        r"\bdist\b",
        r"\bbuild\b",
        r"\bcoverage\b",
        r"(?:^|/)\.git(?:/|$)",
        r"(?:^|/)\.next(?:/|$)",
        r"(?:^|/)\.nuxt(?:/|$)",
        // static assets
        r"\bpublic\b",
        r"\bfixtures?\b",
        // configuration
        r"\bconfigs?\b",
        r"(?:^|/)\.circleci(?:/|$)",
        r"(?i)\bjenkins\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Route-declaration patterns per language.
    pub static ref ENDPOINT_PATTERNS: HashMap<&'static str, Vec<EndpointPattern>> = {
        let mut m = HashMap::new();
        m.insert("Java", vec![
            endpoint(
                "Spring MVC",
                r#"@(?:(?P<method>Get|Post|Put|Delete|Patch)Mapping|RequestMapping)\s*\(\s*(?:path\s*=\s*|value\s*=\s*)?["'](?P<route>[^"']+)["'](?:\s*,[^)]*)?\)"#,
            ),
            endpoint("JAX-RS", r#"@Path\s*\(\s*["'](?P<route>[^"']+)["']\s*\)"#),
            endpoint("Vaadin", r#"@Route\s*\(\s*path\s*=\s*["'](?P<route>[^"']+)["']\s*\)"#),
        ]);
        m.insert("C#", vec![
            endpoint(
                "ASP.NET Core",
                r#"\[Http(?P<method>Get|Post|Put|Delete|Patch)\s*\(\s*["'](?P<route>[^"']+)["']\s*\)\]"#,
            ),
            endpoint(
                "ASP.NET Core Minimal",
                r#"Map(?P<method>Get|Post|Put|Delete|Patch)\s*\(\s*["'](?P<route>[^"']+)["']\s*,"#,
            ),
            endpoint("ASP.NET Route", r#"\[Route\s*\(\s*["'](?P<route>[^"']+)["']\s*\)\]"#),
        ]);
        m.insert("Rust", vec![
            endpoint(
                "Rust HTTP",
                r#"#\[(?P<method>get|post|put|delete|patch)\s*\(\s*["'](?P<route>[^"']+)["']\s*\)\]"#,
            ),
        ]);
        m.insert("Kotlin", vec![
            // Only the first `get` of a `routing { }` block is reported, at
            // the line of `routing`. Later verbs in the block are not seen.
            endpoint("Ktor routing", r#"\brouting\s*\{[^}]*?get\s*\(\s*["'](?P<route>[^"']+)["']"#),
        ]);
        m.insert("Python", vec![
            endpoint(
                "Flask/FastAPI",
                r#"@(?:app|bp|api|router)\.(?:route|(?P<method>get|post|put|delete|patch))\(\s*["'](?P<route>[^"']+)["']"#,
            ),
            endpoint("Django path", r#"\bpath\s*\(\s*["'](?P<route>[^"']+)["']"#),
            endpoint("Django url", r#"\b(?:url|re_path)\s*\(\s*r?["'](?P<route>[^"']+)["']"#),
        ]);
        m.insert("JavaScript", script_patterns());
        m.insert("TypeScript", script_patterns());
        m.insert("Ruby", vec![
            // get 'photos', to: 'photos#index'  /  get '/photos' => 'photos#index'
            endpoint(
                "Rails",
                r#"\b(?:(?P<method>get|post|put|delete|patch)|match)\s+["'](?P<route>[^"']+)["']\s*(?:,\s*to:|=>)"#,
            ),
            endpoint("Rails resources", r#"\bresources?\s+:(?P<route>\w+)"#),
            // get '/' do ... end
            endpoint(
                "Sinatra",
                r#"\b(?P<method>get|post|put|delete|patch)\s+["'](?P<route>[^"']+)["']\s*(?:do\b|\{)"#,
            ),
        ]);
        m.insert("PHP", vec![
            endpoint(
                "Laravel",
                r#"Route::(?:(?P<method>get|post|put|delete|patch)|any)\s*\(\s*["'](?P<route>[^"']+)["']"#,
            ),
            endpoint(
                "Laravel group",
                r#"Route::(?:prefix|middleware|namespace)\s*\(\s*["'](?P<route>[^"']+)["']\)\s*->\s*group\s*\("#,
            ),
            endpoint("Laravel resource", r#"Route::resource\s*\(\s*["'](?P<route>[^"']+)["']"#),
            endpoint("Symfony", r#"(?:@|#\[)Route\s*\(\s*["'](?P<route>[^"']+)["']"#),
        ]);
        m.insert("Go", vec![
            endpoint(
                "Gin",
                r#"\b(?:router|engine|r|g)\.(?P<method>GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD)\s*\(\s*["'`](?P<route>[^"'`]+)["'`]"#,
            ),
            endpoint("net/http", r#"\bhttp\.(?:HandleFunc|Handle)\(\s*["'`](?P<route>[^"'`]+)["'`]"#),
            endpoint("Gorilla Mux", r#"\brouter\.(?:HandleFunc|Handle)\s*\(\s*["'`](?P<route>[^"'`]+)["'`]"#),
        ]);
        m
    };

    /// Client-side HTTP call idioms, evaluated independently of each other.
    pub static ref AJAX_PATTERNS: Vec<AjaxPattern> = [
        ("fetch", r#"\bfetch\(\s*['"](?P<url>[^'"]+)['"]\s*[,)]"#),
        ("axios", r#"\baxios\.(?:get|post|put|delete|patch)\(\s*['"](?P<url>[^'"]+)['"]"#),
        ("axios-config", r#"\baxios\(\s*\{[^}]*url\s*:\s*['"](?P<url>[^'"]+)['"]"#),
        ("xhr-new", r#"\bnew\s+XMLHttpRequest\s*\(\s*\)"#),
        (
            "xhr-open",
            r#"\bxhr\.open\(\s*['"](?:GET|POST|PUT|DELETE|PATCH)['"]\s*,\s*['"](?P<url>[^'"]+)['"]"#,
        ),
        ("jquery-ajax", r#"(?:\$|\bjQuery)\.ajax\(\s*\{[^}]*url\s*:\s*['"](?P<url>[^'"]+)['"]"#),
        ("jquery-shorthand", r#"\$\.?(?:get|post|getJSON|ajax)\(\s*['"](?P<url>[^'"]+)['"]"#),
        ("angularjs", r#"\$http\.(?:get|post|put|delete|patch)\(\s*['"](?P<url>[^'"]+)['"]"#),
        (
            "angular",
            r#"\bthis\.http\.(?:get|post|put|delete|patch)(?:<[^>(]*>)?\(\s*['"](?P<url>[^'"]+)['"]"#,
        ),
    ]
    .iter()
    .map(|&(style, p)| AjaxPattern {
        style,
        regex: Regex::new(p).unwrap(),
    })
    .collect();
}

/// True if `relative_path` falls under any ignore pattern.
pub fn is_ignored_path(relative_path: &str) -> bool {
    ENDPOINT_IGNORE_PATTERNS
        .iter()
        .any(|re| re.is_match(relative_path))
}
