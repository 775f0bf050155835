use super::chart_panel::ChartCard;
use super::charts::ChartKind;
use super::entrance::use_entrance;
use super::poller::{refresh_stats, use_stats_poller};
use super::state::{BATCH_CARD_SLOT, GENERATION_CHART_SLOT, STATUS_CHART_SLOT, card_style};
use super::stat_cards::DashboardStatCards;
use super::toolbar::DashboardToolbar;
use crate::app::ApiCtx;
use crate::features::progress::BatchTracker;
use crate::features::progress::state::TrackerStyle;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardPageProps {
    pub(crate) api: ApiCtx,
}

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page(props: &DashboardPageProps) -> Html {
    let client = props.api.client.clone();
    use_stats_poller(client.clone());
    let on_refresh = Callback::from(move |()| refresh_stats(client.clone()));
    let batches = props.api.config.tracked_batches.clone();
    let batch_card_entered = use_entrance(BATCH_CARD_SLOT);

    html! {
        <div class="dashboard">
            <DashboardToolbar {on_refresh} />
            <DashboardStatCards />
            <div class="row">
                <div class="col-lg-8 mb-4">
                    <ChartCard kind={ChartKind::Generation} slot={GENERATION_CHART_SLOT} />
                </div>
                <div class="col-lg-4 mb-4">
                    <ChartCard kind={ChartKind::Status} slot={STATUS_CHART_SLOT} />
                </div>
            </div>
            if !batches.is_empty() {
                <div class="card mb-4" style={card_style(batch_card_entered, None)}>
                    <div class="card-header">
                        <h6 class="mb-0">{"Batch Progress"}</h6>
                    </div>
                    <div class="card-body">
                        {for batches.iter().map(|batch_id| html! {
                            <BatchTracker
                                key={batch_id.clone()}
                                batch_id={AttrValue::from(batch_id.clone())}
                                style={TrackerStyle::Dashboard}
                            />
                        })}
                    </div>
                </div>
            }
        </div>
    }
}
