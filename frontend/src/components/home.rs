use crate::components::icons::{Activity, FileText, HomeIcon, Power, Shield, Snowflake};
use crate::web::router::Link;
use leptos::prelude::*;

const STEPS: [(&str, &str); 3] = [
    (
        "Sign Up",
        "Create your account in seconds with just your email and password.",
    ),
    (
        "Add Your Devices",
        "Add lights, ACs, TVs, sensors, door locks, and more to your dashboard.",
    ),
    (
        "Control Everything",
        "Toggle devices, adjust AC settings, and monitor activity from anywhere.",
    ),
];

#[derive(Clone, Copy)]
enum Feature {
    SecureLogin,
    Dashboard,
    AcControls,
    ActivityLogs,
    Responsive,
}

impl Feature {
    const ALL: [Feature; 5] = [
        Feature::SecureLogin,
        Feature::Dashboard,
        Feature::AcControls,
        Feature::ActivityLogs,
        Feature::Responsive,
    ];

    fn title(self) -> &'static str {
        match self {
            Feature::SecureLogin => "Secure Login",
            Feature::Dashboard => "Device Dashboard",
            Feature::AcControls => "AC Controls",
            Feature::ActivityLogs => "Activity Logs",
            Feature::Responsive => "Responsive UI",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Feature::SecureLogin => "Token-based sign in keeps your devices safe from unauthorized access.",
            Feature::Dashboard => "View and control all your devices from a single, intuitive dashboard.",
            Feature::AcControls => "Adjust temperature and modes for your air conditioners remotely.",
            Feature::ActivityLogs => "Track all device activities with detailed timestamps and history.",
            Feature::Responsive => "Works perfectly on desktop, tablet, and mobile devices.",
        }
    }

    fn icon(self) -> AnyView {
        match self {
            Feature::SecureLogin => view! { <Shield attr:class="h-6 w-6" /> }.into_any(),
            Feature::Dashboard => view! { <Power attr:class="h-6 w-6" /> }.into_any(),
            Feature::AcControls => view! { <Snowflake attr:class="h-6 w-6" /> }.into_any(),
            Feature::ActivityLogs => view! { <FileText attr:class="h-6 w-6" /> }.into_any(),
            Feature::Responsive => view! { <Activity attr:class="h-6 w-6" /> }.into_any(),
        }
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div>
            <section class="hero min-h-[60vh] bg-base-100">
                <div class="hero-content text-center">
                    <div class="max-w-2xl space-y-6">
                        <div class="flex justify-center">
                            <div class="p-4 rounded-3xl bg-primary/10 text-primary">
                                <HomeIcon attr:class="h-12 w-12" />
                            </div>
                        </div>
                        <h1 class="text-5xl font-bold">
                            <span class="text-primary">"SmartHome"</span>
                            " Hub"
                        </h1>
                        <p class="text-xl opacity-80">
                            "Control your home from anywhere, securely and in real-time."
                        </p>
                        <p class="opacity-70">
                            "Manage all your smart devices from a single dashboard. Turn on lights, adjust your AC, monitor sensors, and keep track of every activity from your browser or phone."
                        </p>
                        <div class="flex flex-col sm:flex-row gap-4 justify-center">
                            <Link to="/register" class="btn btn-primary">"Get Started"</Link>
                            <Link to="/login" class="btn btn-outline">"Login"</Link>
                        </div>
                    </div>
                </div>
            </section>

            <section class="max-w-7xl mx-auto px-4 py-16 space-y-8">
                <div class="text-center">
                    <h2 class="text-3xl font-bold">"How It Works"</h2>
                    <p class="opacity-70">"Get started in three simple steps"</p>
                </div>
                <div class="grid md:grid-cols-3 gap-6">
                    {STEPS
                        .iter()
                        .enumerate()
                        .map(|(i, (title, text))| {
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body">
                                        <div class="text-sm text-primary font-medium">
                                            {format!("Step {}", i + 1)}
                                        </div>
                                        <h3 class="card-title">{*title}</h3>
                                        <p class="opacity-70">{*text}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="bg-base-100">
                <div class="max-w-7xl mx-auto px-4 py-16 space-y-8">
                    <div class="text-center">
                        <h2 class="text-3xl font-bold">"Key Features"</h2>
                        <p class="opacity-70">"Everything you need to manage your smart home"</p>
                    </div>
                    <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-6">
                        {Feature::ALL
                            .into_iter()
                            .map(|feature| {
                                view! {
                                    <div class="card bg-base-200">
                                        <div class="card-body">
                                            <div class="p-2 w-fit rounded-xl bg-primary/10 text-primary">
                                                {feature.icon()}
                                            </div>
                                            <h3 class="card-title text-lg">{feature.title()}</h3>
                                            <p class="text-sm opacity-70">{feature.text()}</p>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </section>

            <section class="max-w-3xl mx-auto px-4 py-16 text-center space-y-6">
                <h2 class="text-3xl font-bold">"Ready to get started?"</h2>
                <p class="opacity-70">
                    "Join now and start managing your devices from anywhere in the world."
                </p>
                <div class="flex flex-col sm:flex-row gap-4 justify-center">
                    <Link to="/register" class="btn btn-primary">"Get Started"</Link>
                    <Link to="/login" class="btn btn-outline">"Login"</Link>
                </div>
            </section>

            <footer class="footer footer-center p-6 bg-base-100 text-base-content/60 text-sm">
                <p>"© SmartHome Hub"</p>
            </footer>
        </div>
    }
}
