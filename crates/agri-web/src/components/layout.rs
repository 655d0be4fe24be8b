//! Static page sections

use leptos::prelude::*;

const NAV_LINKS: [(&str, &str); 5] = [
    ("Home", "#hero"),
    ("Features", "#features"),
    ("Crop AI", "#crop-recommendation"),
    ("Pest Detection", "#pest-detection"),
    ("Assistant", "#chatbot"),
];

#[component]
pub fn Navbar() -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <nav class="navbar">
            <a href="#hero" class="brand">"🌱 AgriGenius"</a>
            <ul class="nav-links" class:open=move || open.get()>
                {NAV_LINKS
                    .iter()
                    .map(|&(name, href)| {
                        view! {
                            <li>
                                <a href=href on:click=move |_| set_open.set(false)>{name}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <a href="#chatbot" class="btn btn-primary">"Try AI Assistant"</a>
            <button class="menu-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>"☰"</button>
        </nav>
    }
}

#[component]
pub fn Hero() -> impl IntoView {
    let highlights = [
        ("🌿", "Crop Recommendations", "AI-powered suggestions"),
        ("☁️", "Weather Insights", "Real-time forecasting"),
        ("📊", "Yield Analysis", "Data-driven farming"),
    ];
    let stats = [("92%", "Accuracy"), ("50+", "Crop Types"), ("24/7", "Support")];

    view! {
        <header id="hero" class="hero">
            <span class="badge">"Transforming Agriculture with AI"</span>
            <h1>
                <span class="accent">"Smart Farming"</span>
                " for a Sustainable Future"
            </h1>
            <p class="tagline">
                "AgriGenius combines AI technology with agricultural expertise to deliver personalized crop recommendations, real-time disease detection, and data-driven insights."
            </p>
            <div class="cta">
                <a href="#crop-recommendation" class="btn btn-primary">"Start Growing Smarter →"</a>
                <a href="#features" class="btn">"Explore Features"</a>
            </div>
            <div class="highlights">
                {highlights
                    .into_iter()
                    .map(|(icon, label, desc)| {
                        view! {
                            <div class="highlight">
                                <span class="icon">{icon}</span>
                                <h3>{label}</h3>
                                <p>{desc}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="stats">
                {stats
                    .into_iter()
                    .map(|(value, label)| view! { <div class="stat"><strong>{value}</strong><span>{label}</span></div> })
                    .collect_view()}
            </div>
        </header>
    }
}

const FEATURES: [(&str, &str, &str); 6] = [
    (
        "💬",
        "AI-Powered Chatbot",
        "Ask farming questions and receive instant AI guidance tailored to your specific needs and location.",
    ),
    (
        "🌱",
        "Smart Crop Recommendations",
        "Get data-driven suggestions for optimal crops based on your soil type, climate conditions, and historical yield data.",
    ),
    (
        "🐛",
        "Pest & Disease Detection",
        "Upload photos of your plants for instant identification of pests and diseases, with eco-friendly treatment recommendations.",
    ),
    (
        "📈",
        "Yield Analysis",
        "Track and analyze your farm's performance over time with detailed insights and improvement suggestions.",
    ),
    (
        "🌦️",
        "Weather Integration",
        "Access hyper-local weather forecasts and receive alerts for adverse conditions that might affect your crops.",
    ),
    (
        "📡",
        "IoT Compatibility",
        "Connect with smart farming devices to automate irrigation, monitoring, and data collection across your farm.",
    ),
];

#[component]
pub fn Features() -> impl IntoView {
    view! {
        <section id="features" class="features">
            <span class="badge">"Features"</span>
            <h2>"Smart Features for Modern Farming"</h2>
            <div class="feature-grid">
                {FEATURES
                    .iter()
                    .map(|&(icon, title, description)| {
                        view! {
                            <div class="feature">
                                <h3>{icon} " " {title}</h3>
                                <p>{description}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();
    let quick_links = ["Home", "About Us", "Features", "Pricing", "Blog", "Contact"];
    let feature_links = [
        "AI Chatbot",
        "Crop Recommendations",
        "Pest Detection",
        "Weather Forecasts",
        "Market Insights",
        "IoT Integration",
    ];

    view! {
        <footer class="footer">
            <div class="footer-brand">
                <h3>"🌱 AgriGenius"</h3>
                <p>"AI-powered farming assistance for a sustainable future."</p>
            </div>
            <div>
                <h4>"Quick Links"</h4>
                <ul>{quick_links.into_iter().map(|l| view! { <li><a href="#">{l}</a></li> }).collect_view()}</ul>
            </div>
            <div>
                <h4>"Features"</h4>
                <ul>{feature_links.into_iter().map(|l| view! { <li><a href="#features">{l}</a></li> }).collect_view()}</ul>
            </div>
            <div>
                <h4>"Contact Us"</h4>
                <p>"123 Farm Avenue, Agricity"</p>
                <p>"support@agrigenius.com"</p>
                <p>"+1 (555) 123-4567"</p>
            </div>
            <p class="copyright">"© " {year} " AgriGenius. All rights reserved."</p>
        </footer>
    }
}
