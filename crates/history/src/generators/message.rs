//! Commit message corpus.

use rand::Rng;
use rand::seq::SliceRandom;

/// Pool of commit messages sampled uniformly during plan building.
#[derive(Debug, Clone)]
pub struct MessageCorpus {
    messages: Vec<String>,
}

impl MessageCorpus {
    /// Creates a corpus from explicit messages.
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// Number of messages in the pool.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Picks one message uniformly, or `None` for an empty pool.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&str> {
        self.messages.choose(rng).map(String::as_str)
    }
}

impl Default for MessageCorpus {
    fn default() -> Self {
        Self::new(default_messages())
    }
}

/// The stock pool: plausible messages for a student's year of coursework,
/// side projects, and tinkering.
fn default_messages() -> Vec<String> {
    vec![
        // Academic project work
        "implement user authentication system".into(),
        "add database schema for student records".into(),
        "fix login validation bug".into(),
        "update API endpoints for course management".into(),
        "refactor student dashboard component".into(),
        "add error handling for file uploads".into(),
        "implement real-time notifications".into(),
        "optimize database queries".into(),
        "add unit tests for user service".into(),
        "fix responsive design issues".into(),
        "update documentation".into(),
        "implement search functionality".into(),
        "add data validation".into(),
        "fix memory leak in image processing".into(),
        "optimize performance for large datasets".into(),
        "add logging for debugging".into(),
        "implement caching mechanism".into(),
        "fix cross-browser compatibility".into(),
        "add input sanitization".into(),
        "update dependencies".into(),
        // Personal projects
        "initial commit for portfolio website".into(),
        "add dark mode toggle".into(),
        "implement contact form".into(),
        "fix mobile navigation".into(),
        "add project showcase section".into(),
        "optimize images for web".into(),
        "add smooth scrolling animations".into(),
        "implement lazy loading".into(),
        "fix accessibility issues".into(),
        "add SEO meta tags".into(),
        // Learning and experiments
        "experiment with new React hooks".into(),
        "try different sorting algorithms".into(),
        "learn about microservices architecture".into(),
        "practice with TypeScript generics".into(),
        "explore GraphQL queries".into(),
        "test new CSS grid layouts".into(),
        "experiment with WebGL".into(),
        "practice with Docker containers".into(),
        "learn about Redis caching".into(),
        "explore machine learning basics".into(),
        // Bug fixes and improvements
        "fix null pointer exception".into(),
        "improve error messages".into(),
        "add input validation".into(),
        "fix timezone handling".into(),
        "optimize image compression".into(),
        "fix memory allocation issue".into(),
        "improve code readability".into(),
        "add configuration options".into(),
        "fix race condition".into(),
        "update error handling".into(),
        // General development
        "clean up unused imports".into(),
        "update README with setup instructions".into(),
        "add environment variables".into(),
        "fix linting errors".into(),
        "update package versions".into(),
        "add code comments".into(),
        "refactor for better maintainability".into(),
        "add integration tests".into(),
        "improve user experience".into(),
        "add loading states".into(),
    ]
}
