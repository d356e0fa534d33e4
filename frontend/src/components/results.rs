use shared::format::{bar_width, confidence_percent, disease_label, yield_amount};
use shared::{DiseaseResponse, RequestState, YieldResponse};
use yew::prelude::*;

pub fn render_disease_result(state: &RequestState<DiseaseResponse>) -> Html {
    let Some(result) = state.value() else {
        return html! {};
    };

    let ranked = result.ranked_predictions();

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-leaf"></i>{" Detection Result"}</h2>
                <p class="detected-disease">{ disease_label(&result.disease) }</p>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={bar_width(result.confidence)}></div>
                    </div>
                    <div class="meter-value">{ confidence_percent(result.confidence) }</div>
                </div>
            </div>
            <div class="treatment-advice">
                <h3>{"Treatment Advice"}</h3>
                <p>{ &result.treatment_advice }</p>
            </div>
            if let Some(model) = &result.model_used {
                <p class="model-used">{ format!("Model: {}", model) }</p>
            }
            if !ranked.is_empty() {
                <div class="detailed-results">
                    <h3>{"All Predictions"}</h3>
                    <div class="result-bars">
                        { for ranked.iter().map(|(label, probability)| html! {
                            <div class="result-item" key={label.to_string()}>
                                <div class="result-label">{ disease_label(label) }</div>
                                <div class="result-bar-container">
                                    <div class="result-bar" style={bar_width(*probability)}></div>
                                </div>
                                <div class="result-value">{ confidence_percent(*probability) }</div>
                            </div>
                        })}
                    </div>
                </div>
            }
        </div>
    }
}

pub fn render_yield_result(state: &RequestState<YieldResponse>) -> Html {
    let Some(result) = state.value() else {
        return html! {};
    };

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-seedling"></i>{" Predicted Yield"}</h2>
                <p class="predicted-yield">{ yield_amount(result.predicted_yield) }</p>
                <p class="prediction-type">{ format!("Model: {}", result.prediction_type.label()) }</p>
            </div>
            if !result.recommendations.is_empty() {
                <div class="recommendations">
                    <h3>{"Recommendations"}</h3>
                    <ul>
                        { for result.recommendations.iter().map(|line| html! { <li>{ line }</li> }) }
                    </ul>
                </div>
            }
        </div>
    }
}
