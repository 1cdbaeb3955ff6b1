use std::collections::HashMap;

use crate::models::Repository;

const LANGUAGE_WEIGHT: u32 = 2;
const CURATED_WEIGHT: u32 = 3;
const MAX_TAGS: usize = 24;

// Topic slugs worth surfacing, mapped to display names. Unknown slugs are
// dropped rather than shown raw.
const TOPIC_DISPLAY: &[(&str, &str)] = &[
    ("react", "React"),
    ("reactjs", "React"),
    ("nextjs", "Next.js"),
    ("next-js", "Next.js"),
    ("nodejs", "Node.js"),
    ("node-js", "Node.js"),
    ("express", "Express.js"),
    ("expressjs", "Express.js"),
    ("spring-boot", "Spring Boot"),
    ("springboot", "Spring Boot"),
    ("typescript", "TypeScript"),
    ("javascript", "JavaScript"),
    ("java", "Java"),
    ("python", "Python"),
    ("tailwindcss", "Tailwind CSS"),
    ("tailwind-css", "Tailwind CSS"),
    ("mongodb", "MongoDB"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("docker", "Docker"),
    ("aws", "AWS"),
    ("firebase", "Firebase"),
    ("firebase-auth", "Firebase"),
    ("firebase-database", "Firebase"),
    ("graphql", "GraphQL"),
    ("rest-api", "REST API"),
    ("react-native", "React Native"),
    ("stripe", "Stripe"),
    ("electron", "Electron"),
    ("electron-app", "Electron"),
    ("vite", "Vite"),
    ("prisma", "Prisma"),
    ("supabase", "Supabase"),
    ("supabase-auth", "Supabase"),
    ("supabase-db", "Supabase"),
    ("vercel", "Vercel"),
    ("android", "Android"),
    ("android-app", "Android"),
    ("kotlin", "Kotlin"),
    ("flutter", "Flutter"),
    ("dart", "Dart"),
    ("fastapi", "FastAPI"),
    ("expo", "Expo"),
    ("expo-cli", "Expo"),
    ("expo-go", "Expo"),
    ("google-cloud", "Google Cloud"),
    ("gcp", "Google Cloud"),
    ("c", "C"),
    ("cpp", "C++"),
    ("c-plus-plus", "C++"),
    ("git", "Git"),
    ("cloudinary", "Cloudinary"),
    ("gemini-api", "Gemini"),
    ("redis", "Redis"),
    ("socket-io", "Socket.io"),
    ("socketio", "Socket.io"),
    ("jwt", "JWT"),
    ("oauth2", "OAuth2"),
    ("oauth", "OAuth2"),
    ("thymeleaf", "Thymeleaf"),
    ("maven", "Maven"),
    ("spring-security", "Spring Security"),
    ("microservices", "Microservices"),
    // the misspelled slug exists on live repositories
    ("micorservices", "Microservices"),
];

// Technologies named on the profile README. Each gets a flat boost so it
// can surface even without a matching repo language or topic.
const CURATED_TECH: &[&str] = &[
    "React",
    "Next.js",
    "Tailwind CSS",
    "Node.js",
    "Express.js",
    "Spring Boot",
    "MongoDB",
    "MySQL",
    "Firebase",
    "Supabase",
    "AWS",
    "Google Cloud",
    "Stripe",
    "React Native",
    "Electron",
    "C",
    "C++",
    "Redis",
    "Socket.io",
    "Cloudinary",
    "Gemini",
    "Microservices",
    "Git",
];

// Languages too generic to be interesting as tags.
const EXCLUDED_LANGUAGES: &[&str] = &["EJS", "HTML", "CSS", "Shell", "Dockerfile"];

fn display_name(slug: &str) -> Option<&'static str> {
    TOPIC_DISPLAY
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, display)| *display)
}

/// Ranked technology tags across non-fork repositories: primary languages
/// weigh double, recognized topics weigh single, and the curated list gets
/// a flat boost on top. Heaviest first, capped and name-tie-broken.
pub fn rank_tags(repos: &[Repository]) -> Vec<String> {
    let mut weights: HashMap<String, u32> = HashMap::new();

    for repo in repos.iter().filter(|r| !r.fork) {
        if let Some(language) = &repo.language {
            *weights.entry(language.clone()).or_insert(0) += LANGUAGE_WEIGHT;
        }

        for topic in &repo.topics {
            if let Some(display) = display_name(&topic.to_lowercase()) {
                *weights.entry(display.to_string()).or_insert(0) += 1;
            }
        }
    }

    for tech in CURATED_TECH {
        *weights.entry((*tech).to_string()).or_insert(0) += CURATED_WEIGHT;
    }

    let mut ranked: Vec<(String, u32)> = weights
        .into_iter()
        .filter(|(name, _)| !EXCLUDED_LANGUAGES.contains(&name.as_str()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(MAX_TAGS)
        .map(|(name, _)| name)
        .collect()
}
