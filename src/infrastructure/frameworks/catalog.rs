//! 내장 프레임워크 정의 목록.

/// 프레임워크 감지 조건과 실행 기본값.
#[derive(Debug)]
pub struct FrameworkDefinition {
    pub id: &'static str,
    pub name: &'static str,
    /// 이 중 하나라도 의존성에 있으면 감지
    pub npm_dependencies: &'static [&'static str],
    /// 이 중 하나라도 있으면 npm 의존성 조건을 무시한다(상위 프레임워크가 우선)
    pub excluded_npm_dependencies: &'static [&'static str],
    /// 이 중 하나라도 프로젝트 루트에 있으면 감지
    pub config_files: &'static [&'static str],
    /// package.json 스크립트가 없을 때 쓰는 기본 명령
    pub dev_command: &'static str,
    pub dev_port: u16,
    pub build_directory: &'static str,
    pub static_assets_directory: Option<&'static str>,
    pub env: &'static [(&'static str, &'static str)],
    pub watch_args: &'static [&'static [&'static str]],
}

impl FrameworkDefinition {
    /// package.json 스크립트에서 이 프레임워크 실행 여부를 판별할 실행 파일 이름.
    pub fn binary(&self) -> &'static str {
        self.dev_command
            .split_whitespace()
            .next()
            .unwrap_or(self.dev_command)
    }
}

pub const FRAMEWORKS: &[FrameworkDefinition] = &[
    FrameworkDefinition {
        id: "next",
        name: "Next.js",
        npm_dependencies: &["next"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "next dev",
        dev_port: 3000,
        build_directory: ".next",
        static_assets_directory: None,
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "sveltekit",
        name: "SvelteKit",
        npm_dependencies: &["@sveltejs/kit"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "vite dev",
        dev_port: 5173,
        build_directory: "build",
        static_assets_directory: Some("static"),
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "astro",
        name: "Astro",
        npm_dependencies: &["astro"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "astro dev",
        dev_port: 4321,
        build_directory: "dist",
        static_assets_directory: None,
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "nuxt",
        name: "Nuxt",
        npm_dependencies: &["nuxt", "nuxt3"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "nuxt dev",
        dev_port: 3000,
        build_directory: ".output/public",
        static_assets_directory: None,
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "vite",
        name: "Vite",
        npm_dependencies: &["vite"],
        excluded_npm_dependencies: &["@sveltejs/kit", "astro", "nuxt", "nuxt3"],
        config_files: &[],
        dev_command: "vite",
        dev_port: 5173,
        build_directory: "dist",
        static_assets_directory: None,
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "create-react-app",
        name: "Create React App",
        npm_dependencies: &["react-scripts"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "react-scripts start",
        dev_port: 3000,
        build_directory: "build",
        static_assets_directory: None,
        env: &[("BROWSER", "none"), ("PORT", "3000")],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "gatsby",
        name: "Gatsby",
        npm_dependencies: &["gatsby"],
        excluded_npm_dependencies: &[],
        config_files: &[],
        dev_command: "gatsby develop",
        dev_port: 8000,
        build_directory: "public",
        static_assets_directory: None,
        env: &[("GATSBY_LOGGER", "yurnalist")],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "eleventy",
        name: "Eleventy",
        npm_dependencies: &["@11ty/eleventy"],
        excluded_npm_dependencies: &[],
        config_files: &[".eleventy.js", "eleventy.config.js"],
        dev_command: "eleventy --serve",
        dev_port: 8080,
        build_directory: "_site",
        static_assets_directory: None,
        env: &[],
        watch_args: &[],
    },
    FrameworkDefinition {
        id: "hugo",
        name: "Hugo",
        npm_dependencies: &[],
        excluded_npm_dependencies: &[],
        config_files: &["hugo.toml", "hugo.yaml", "hugo.json"],
        dev_command: "hugo",
        dev_port: 1313,
        build_directory: "public",
        static_assets_directory: None,
        env: &[],
        watch_args: &[&["server", "-w"], &["server", "--disableFastRender"]],
    },
];

pub fn find(id: &str) -> Option<&'static FrameworkDefinition> {
    FRAMEWORKS.iter().find(|f| f.id == id)
}
